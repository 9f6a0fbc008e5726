use std::io::{BufRead, Write};
use std::time::Duration;

use neurotiq_core::{ChatMessage, ChatSession, Sender};

pub fn run(messages: &[String], reply_delay_ms: u64) {
    let rt = super::runtime();
    let mut session = ChatSession::with_reply_delay(Duration::from_millis(reply_delay_ms));

    for msg in session.messages() {
        println!("{}", render(msg));
    }

    if !messages.is_empty() {
        for text in messages {
            if let Some((question, answer)) = rt.block_on(session.converse(text)) {
                println!("{}", render(&question));
                println!("{}", render(&answer));
            }
        }
        return;
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let Some(Ok(line)) = lines.next() else {
            break;
        };
        if matches!(line.trim(), "exit" | "quit") {
            break;
        }
        if let Some((_, answer)) = rt.block_on(session.converse(&line)) {
            println!("{}", render(&answer));
        }
    }
}

fn render(msg: &ChatMessage) -> String {
    match msg.sender {
        Sender::Bot => format!("NeuroAssistant: {}", msg.text),
        Sender::User => format!("You: {}", msg.text),
    }
}
