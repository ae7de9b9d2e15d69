//! Interactive follow-up chat on stdin

use anyhow::Result;
use review_session::{format_entries, ReviewBackend, ReviewSession};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

const HELP: &str = "Ask a question about the submittal. /transcript shows the chat so far, /quit ends the session.";

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Ask(&'a str),
    Transcript,
    Help,
    Quit,
    Blank,
}

fn parse(line: &str) -> Command<'_> {
    match line.trim() {
        "" => Command::Blank,
        "/quit" | "/exit" => Command::Quit,
        "/transcript" => Command::Transcript,
        "/help" => Command::Help,
        question => Command::Ask(question),
    }
}

pub async fn run<B: ReviewBackend>(session: &ReviewSession<B>) -> Result<()> {
    run_with(session, BufReader::new(tokio::io::stdin())).await
}

async fn run_with<B, R>(session: &ReviewSession<B>, input: R) -> Result<()>
where
    B: ReviewBackend,
    R: AsyncBufRead + Unpin,
{
    println!("\n{}", HELP);
    let mut lines = input.lines();
    let mut seen = session.transcript().len().await;

    while let Some(line) = lines.next_line().await? {
        match parse(&line) {
            Command::Quit => break,
            Command::Blank => continue,
            Command::Help => println!("{}", HELP),
            Command::Transcript => {
                print!("{}", format_entries(&session.transcript().entries().await));
            }
            Command::Ask(question) => {
                if let Err(err) = session.send(question).await {
                    if err.is_precondition() {
                        println!("! {}", err);
                    }
                }
                let new = session.transcript().entries_since(seen).await;
                seen += new.len();
                print!("{}", format_entries(&new));
            }
        }
    }

    Ok(())
}
