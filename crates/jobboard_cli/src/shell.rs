//! Interactive session: one command per line until `quit` or EOF.

use std::collections::HashSet;
use std::io::Write;

use anyhow::Result;
use jobboard_core::engine::ReconciliationEngine;
use jobboard_core::prefs::PreferenceStore;
use jobboard_core::source::JobSource;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::actions::{self, to_index, View};
use crate::args::Command;
use crate::render;

const HELP: &str = "\
Commands:
  list                 show the board
  search [term]        filter by name (no term clears)
  category <name>      restrict to a category (All clears)
  sort <key>           dateDesc dateAsc nameAsc nameDesc categoryAsc categoryDesc
  page <n> | next | prev
  move <from> <to>     reorder (category must be All)
  expand <i>           toggle details of a card
  show <i>             print one card expanded
  refresh              fetch the current page again
  reset                clear filters, sort and manual orders
  categories           list categories
  quit";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Run(Command),
    Next,
    Prev,
    Refresh,
    Expand(usize),
    Help,
    Quit,
}

/// Parse one line. Blank lines are `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => ShellCommand::Run(Command::List),
        "search" => ShellCommand::Run(Command::Search {
            term: rest.to_string(),
        }),
        "category" | "cat" => ShellCommand::Run(Command::Category {
            name: required(rest, "category <name>")?.to_string(),
        }),
        "sort" => ShellCommand::Run(Command::Sort {
            key: required(rest, "sort <key>")?
                .parse()
                .map_err(|e: jobboard_core::models::ParseSortKeyError| e.to_string())?,
        }),
        "page" => ShellCommand::Run(Command::Page {
            number: number(rest, "page <n>")?,
        }),
        "move" | "mv" => {
            let mut parts = rest.split_whitespace();
            let from = number(parts.next().unwrap_or(""), "move <from> <to>")?;
            let to = number(parts.next().unwrap_or(""), "move <from> <to>")?;
            ShellCommand::Run(Command::Move { from, to })
        }
        "show" => ShellCommand::Run(Command::Show {
            index: number(rest, "show <i>")?,
        }),
        "reset" => ShellCommand::Run(Command::Reset),
        "categories" => ShellCommand::Run(Command::Categories),
        "next" | "n" => ShellCommand::Next,
        "prev" | "p" => ShellCommand::Prev,
        "refresh" | "r" => ShellCommand::Refresh,
        "expand" | "x" => ShellCommand::Expand(number(rest, "expand <i>")?),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };
    Ok(Some(command))
}

fn required<'a>(value: &'a str, usage: &str) -> Result<&'a str, String> {
    if value.is_empty() {
        Err(format!("Usage: {}", usage))
    } else {
        Ok(value)
    }
}

fn number<T: std::str::FromStr>(value: &str, usage: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("Usage: {}", usage))
}

/// Run the session until `quit` or end of input.
pub async fn run<S, P>(engine: &mut ReconciliationEngine<S, P>, categories: &[String]) -> Result<()>
where
    S: JobSource,
    P: PreferenceStore,
{
    engine.initialize().await;
    let mut expanded: HashSet<String> = HashSet::new();
    print_board(engine, &expanded);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("jobboard> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Run(Command::Categories) => println!("{}", categories.join("\n")),
            ShellCommand::Run(Command::Shell) => println!("Already in a shell"),
            ShellCommand::Run(command) => match actions::apply(engine, &command, categories).await
            {
                Ok(View::Board) => print_board(engine, &expanded),
                Ok(View::Card(i)) => print!(
                    "{}",
                    render::job_card(i + 1, &engine.displayed_jobs()[i], true)
                ),
                Err(e) => println!("{}", e),
            },
            ShellCommand::Next => {
                if engine.next_page().await {
                    print_board(engine, &expanded);
                } else {
                    println!("Already on the last page");
                }
            }
            ShellCommand::Prev => {
                if engine.previous_page().await {
                    print_board(engine, &expanded);
                } else {
                    println!("Already on the first page");
                }
            }
            ShellCommand::Refresh => {
                engine.refresh().await;
                print_board(engine, &expanded);
            }
            ShellCommand::Expand(position) => {
                match to_index(position, engine.displayed_jobs().len()) {
                    Ok(i) => {
                        let id = engine.displayed_jobs()[i].id.clone();
                        if !expanded.remove(&id) {
                            expanded.insert(id);
                        }
                        print_board(engine, &expanded);
                    }
                    Err(e) => println!("{}", e),
                }
            }
        }
    }
    Ok(())
}

fn print_board<S, P>(engine: &ReconciliationEngine<S, P>, expanded: &HashSet<String>)
where
    S: JobSource,
    P: PreferenceStore,
{
    let displayed = engine.displayed_jobs();
    print!(
        "{}",
        render::board(engine, |i| expanded.contains(&displayed[i].id))
    );
}
