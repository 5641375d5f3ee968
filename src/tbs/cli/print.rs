use colored::Colorize;
use std::io::{self, Write};
use tbs::commands::{CmdMessage, CmdResult, MessageLevel};
use tbs::error::Result;
use tbs_render::Renderer;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Success => eprintln!("{}", message.content.green()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

/// Prints the messages, then renders the payload (if any) to stdout.
pub(super) fn print_result(result: &CmdResult, format: &str) -> Result<()> {
    print_messages(&result.messages);
    if let Some(payload) = &result.payload {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        Renderer::new(format, payload).render(&mut out)?;
        out.flush()?;
    }
    Ok(())
}

pub(super) fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
