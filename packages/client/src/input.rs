//! Line input from the terminal.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

/// Text to send for one input line, or `None` for a blank line
pub fn outgoing_text(line: &str) -> Option<&str> {
    let line = line.trim();
    (!line.is_empty()).then_some(line)
}

/// Read lines on a dedicated thread and hand them to the async side.
///
/// The receiver closes on Ctrl+C, Ctrl+D or a readline failure, which ends
/// the chat phase of the session.
pub fn spawn_line_reader(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            let line = match editor.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    tracing::info!("Input closed");
                    break;
                }
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    break;
                }
            };

            let Some(text) = outgoing_text(&line) else {
                continue;
            };
            editor.add_history_entry(text).ok();
            if tx.send(text.to_string()).is_err() {
                break;
            }
        }
    });

    rx
}
