//! Interactive admin console on stdin
//!
//! Runs alongside the serving adapter until stdin closes, the way a
//! detached deployment closes it immediately.

use depot_console::{CommandStatus, Console};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

pub async fn run(console: Console) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let context = console.execute(&line);
                for line in context.output() {
                    println!("{line}");
                }
                if context.status == CommandStatus::Failed {
                    println!("! command failed");
                }
            }
            Ok(None) => break,
            Err(error) => {
                warn!(%error, "admin console input closed");
                break;
            }
        }
    }
}
