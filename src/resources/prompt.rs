//! Terminal interaction: yes/no confirmation and single-line input.
use std::fmt::Debug;
use std::io::{self, BufRead, Write};

/// Source of interactive answers.
///
/// Reconciliation asks exactly one question (whether to adopt an existing
/// target as the new source); `edit` uses [`input`](Self::input) for its
/// interactive mode.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt: Debug {
    /// Ask a yes/no question; `true` means yes.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn confirm(&self, question: &str) -> io::Result<bool>;

    /// Ask for a line of text. `current` is shown as the default; an empty
    /// answer returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn input(&self, label: &str, current: &str) -> io::Result<String>;
}

/// Prompts on stderr and reads answers from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> io::Result<bool> {
        confirm_with(question, &mut io::stdin().lock(), &mut io::stderr())
    }

    fn input(&self, label: &str, current: &str) -> io::Result<String> {
        input_with(label, current, &mut io::stdin().lock(), &mut io::stderr())
    }
}

/// Answers yes to every question and keeps every current value.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Prompt for AssumeYes {
    fn confirm(&self, _question: &str) -> io::Result<bool> {
        Ok(true)
    }

    fn input(&self, _label: &str, current: &str) -> io::Result<String> {
        Ok(current.to_string())
    }
}

fn read_answer(reader: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no answer on standard input",
        ));
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

fn confirm_with(
    question: &str,
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> io::Result<bool> {
    write!(writer, "{question} [y/N] ")?;
    writer.flush()?;
    let answer = read_answer(reader)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn input_with(
    label: &str,
    current: &str,
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> io::Result<String> {
    write!(writer, "{label} [{current}]: ")?;
    writer.flush()?;
    let answer = read_answer(reader)?;
    if answer.trim().is_empty() {
        Ok(current.to_string())
    } else {
        Ok(answer)
    }
}
