use crate::runner::InputResult;
use crate::{Captures, Matcher, MatchError, Template, TemplateError};
use std::collections::BTreeMap;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes match results as JSON lines on stdout and diagnostics on stderr.
pub struct Output {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl Output {
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            // JSON on stdout stays uncolored so it can be piped.
            stdout: StandardStream::stdout(ColorChoice::Never),
            stderr: StandardStream::stderr(color_choice),
        }
    }

    fn set_color(&mut self, color: Color) {
        let _ = self
            .stderr
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    }

    fn set_dim(&mut self) {
        let _ = self.stderr.set_color(ColorSpec::new().set_dimmed(true));
    }

    fn reset(&mut self) {
        let _ = self.stderr.reset();
    }

    pub fn print_result(&mut self, result: &InputResult) -> io::Result<()> {
        match &result.outcome {
            Ok(captures) => self.print_captures(captures),
            Err(err) => self.print_failure(result.line, &result.input, err),
        }
    }

    /// One JSON object per line, keys sorted.
    pub fn print_captures(&mut self, captures: &Captures) -> io::Result<()> {
        let sorted: BTreeMap<&str, &str> = captures
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        serde_json::to_writer(&mut self.stdout, &sorted)?;
        writeln!(self.stdout)
    }

    fn print_failure(&mut self, line: usize, input: &str, err: &MatchError) -> io::Result<()> {
        self.set_color(Color::Red);
        write!(self.stderr, "✗")?;
        self.reset();
        write!(self.stderr, " line {}: {}", line, err)?;
        self.set_dim();
        writeln!(self.stderr, "  {:?}", input)?;
        self.reset();
        Ok(())
    }

    pub fn print_template_error(&mut self, template: &str, err: &TemplateError) -> io::Result<()> {
        self.set_color(Color::Red);
        write!(self.stderr, "error:")?;
        self.reset();
        writeln!(self.stderr, " {}", err)?;
        self.set_dim();
        writeln!(self.stderr, "  in template {:?}", template)?;
        self.reset();
        Ok(())
    }

    /// One line per spec: position, field, length interval, matcher.
    pub fn print_explain(&mut self, template: &Template) -> io::Result<()> {
        for (i, spec) in template.specs().iter().enumerate() {
            let matcher = match &spec.matcher {
                Matcher::Literal(bytes) => format!("literal {:?}", String::from_utf8_lossy(bytes)),
                Matcher::Class(_) => spec.matcher.type_code().unwrap_or_default(),
            };
            writeln!(
                self.stdout,
                "{:>3}  {:<16} {:<12} {}",
                i,
                spec.name().unwrap_or("_"),
                spec.length.floored(0).to_string(),
                matcher
            )?;
        }
        Ok(())
    }

    pub fn print_summary(&mut self, results: &[InputResult]) -> io::Result<()> {
        let matched = results.iter().filter(|r| r.matched()).count();
        let failed = results.len() - matched;
        if failed == 0 {
            return Ok(());
        }
        self.set_color(Color::Red);
        write!(self.stderr, "{} of {} inputs did not match", failed, results.len())?;
        self.reset();
        writeln!(self.stderr)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}
