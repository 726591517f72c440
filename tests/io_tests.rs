use split_ledger::domain::{Money, SplitMethod};
use split_ledger::engine::AllocationEngine;
use split_ledger::parsing::DraftCommand;
use split_ledger::{output, parsing};

const OUTPUT: &str = include_str!("io_tests/test_output.csv");
const INPUT: &[u8] = include_bytes!("io_tests/test_input.csv");

// test input
#[test]
fn test_input() {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(INPUT);

    let commands = parsing::deserialize_csv(&mut rdr).collect::<Vec<_>>();

    let expected = vec![
        DraftCommand::Title("Team dinner".to_owned()),
        DraftCommand::Total(Money::parse("100.00")),
        DraftCommand::Method(SplitMethod::Equal),
        DraftCommand::Participant { id: 1.into(), name: "Alice".to_owned() },
        DraftCommand::Participant { id: 2.into(), name: "Bob".to_owned() },
        DraftCommand::Participant { id: 3.into(), name: "Carol".to_owned() },
        DraftCommand::Payer { id: 1.into(), amount: None },
    ];

    assert_eq!(commands, expected);
}

// test output
#[test]
fn test_output() -> anyhow::Result<()> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(INPUT);

    let commands = parsing::deserialize_csv(&mut rdr);
    let (draft, directory) = parsing::assemble(commands, 0.into());

    let engine = AllocationEngine::new(directory);
    let ledger = engine.finalize(&draft)?;

    let mut output = Vec::new();
    output::write_ledger(&ledger, engine.directory(), &mut output)?;

    let output = String::from_utf8(output)?;

    assert_eq!(output, OUTPUT);

    Ok(())
}
