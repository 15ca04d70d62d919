//! User-facing console lines.
//! Colors are enabled only when the target stream is a TTY; log events go through
//! tracing instead and are controlled by the log level.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Stream {
    Out,
    Err,
}

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Warn,
    Error,
    Success,
}

fn is_tty(stream: Stream) -> bool {
    match stream {
        Stream::Out => atty::is(atty::Stream::Stdout),
        Stream::Err => atty::is(atty::Stream::Stderr),
    }
}

fn emit(stream: Stream, tone: Tone, msg: &str) {
    let label = match tone {
        Tone::Info => "info:",
        Tone::Warn => "warn:",
        Tone::Error => "error:",
        Tone::Success => "ok:",
    };
    let line = if is_tty(stream) {
        let colored = match tone {
            Tone::Info => label.cyan().bold().to_string(),
            Tone::Warn => label.yellow().bold().to_string(),
            Tone::Error => label.red().bold().to_string(),
            Tone::Success => label.green().bold().to_string(),
        };
        format!("{colored} {msg}")
    } else {
        format!("{label} {msg}")
    };
    match stream {
        Stream::Out => println!("{line}"),
        Stream::Err => eprintln!("{line}"),
    }
}

pub fn print_info(msg: &str) {
    emit(Stream::Out, Tone::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Stream::Err, Tone::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Stream::Err, Tone::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Stream::Out, Tone::Success, msg);
}

/// Print a plain line (no prefix). Used for per-entry lines and the report,
/// which users may script against.
pub fn print_user(msg: &str) {
    println!("{msg}");
}

/// Horizontal rule between the header, the entries and the report.
pub fn print_rule() {
    print_user(&"-".repeat(58));
}
