//! Interactive question loop.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use finsight_core::{FinancialDataset, Responder};

use crate::error::CliError;

const GREETING: &str = "\
Hello! I can answer questions about Microsoft, Tesla, and Apple: total
revenue, net income, total assets, total liabilities, cash flow from
operating activities, and their year-over-year growth rates, for fiscal
years 2022 through 2024.

Examples:
  - What is Apple's revenue for 2022?
  - Tell me about Microsoft's net income growth.
  - Summarise Tesla's performance for 2023.

Type 'exit' or press Ctrl-D to leave.
";

pub fn run(dataset: &FinancialDataset) -> Result<(), CliError> {
    let responder = Responder::new(dataset);
    let mut editor = DefaultEditor::new()?;

    println!("{GREETING}");

    loop {
        match editor.readline("you> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
                    break;
                }

                editor.add_history_entry(line)?;

                let reply = responder.answer(line);
                println!("{}", reply.text.trim_end());
                if let Some(suggestion) = &reply.suggestion {
                    println!("{suggestion}");
                }
                println!();
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error.into()),
        }
    }

    println!("Goodbye!");
    Ok(())
}
