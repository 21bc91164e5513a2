use crate::cli::ChatArgs;
use crate::conversation::transport::HttpRelayTransport;
use crate::conversation::{ ConversationStore, SubmitOutcome };
use crate::render::render_message;
use log::{ debug, info };
use std::error::Error;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{ AsyncBufReadExt, BufReader };

const WELCOME: &str = "你好呀！我是 Cherry~ ✨ 有什么我可以帮你的吗？";
const HINT: &str = "Enter sends the message, end a line with \\ to continue on the next line. Ctrl-D quits.";

/// Appends one input line to `entry`. Returns true once the entry is complete.
fn push_line(entry: &mut String, line: &str) -> bool {
    match line.strip_suffix('\\') {
        Some(head) => {
            entry.push_str(head);
            entry.push('\n');
            false
        }
        None => {
            entry.push_str(line);
            true
        }
    }
}

fn prompt(continuation: bool) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", if continuation { "… " } else { "> " })?;
    stdout.flush()
}

pub async fn run(args: ChatArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    let transport = Arc::new(HttpRelayTransport::new(args.relay_url.clone()));
    info!("Chatting through relay at {}", transport.endpoint());
    let store = ConversationStore::new(transport);

    if store.is_empty() {
        println!("{}", WELCOME);
        println!("{}", HINT);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut entry = String::new();
    prompt(false)?;

    while let Some(line) = lines.next_line().await? {
        if !push_line(&mut entry, &line) {
            prompt(true)?;
            continue;
        }

        store.set_input(std::mem::take(&mut entry));
        if !store.input().trim().is_empty() {
            println!("Cherry 正在思考...");
        }

        match store.submit_input().await {
            SubmitOutcome::Ignored => debug!("Skipped blank input"),
            SubmitOutcome::Replied | SubmitOutcome::Fallback => {
                if let Some(reply) = store.messages().last() {
                    if args.render_html {
                        println!("{}", render_message(reply));
                    } else {
                        println!("{}\n", reply.content());
                    }
                }
            }
        }
        prompt(false)?;
    }

    info!("Conversation ended after {} message(s)", store.len());
    Ok(())
}
