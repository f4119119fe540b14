use clap::Parser;
use flashdeck_core::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "flashdeck")]
#[command(about = "Interactive flashcard study tool", long_about = None)]
#[command(disable_help_flag = true)]
struct Cli {
    /// Legacy startup flags: `-import <path>` and `-export <path>`, in
    /// either order. `-import` loads a deck before the session starts;
    /// `-export` saves the deck when the session ends cleanly.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    args: Vec<String>,
}

fn main() -> Result<()> {
    flashdeck_core::logging::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let (import_path, export_path) = parse_startup_args(&cli.args);
    let import_path = import_path.or(config.data.import_on_start);
    let export_path = export_path.or(config.data.export_on_exit);

    let mut session = Session::new();

    if let Some(path) = import_path {
        session.import_deck(&path);
    }

    session.run()?;
    println!("Bye bye!");

    // Export-on-exit only runs after a clean exit; an error above skips it
    if let Some(path) = export_path {
        session.export_deck(&path);
    }

    Ok(())
}

/// Parse the legacy single-dash startup flags positionally.
///
/// A flag's value is the argument right after it. The value is ignored when
/// it is literally the other flag, and a flag in final position is ignored
/// entirely.
fn parse_startup_args(args: &[String]) -> (Option<PathBuf>, Option<PathBuf>) {
    let mut import = None;
    let mut export = None;

    if let Some(index) = args.iter().position(|a| a == "-import") {
        if let Some(value) = args.get(index + 1) {
            if value != "-export" {
                import = Some(PathBuf::from(value));
            }
        }
    }

    if let Some(index) = args.iter().position(|a| a == "-export") {
        if let Some(value) = args.get(index + 1) {
            if value != "-import" {
                export = Some(PathBuf::from(value));
            }
        }
    }

    (import, export)
}

/// One interactive session: the card store, the input stream, and the
/// transcript of every prompt, reply, and message.
struct Session {
    store: CardStore,
    transcript: Vec<String>,
    stdin: io::StdinLock<'static>,
}

/// Answer source that prompts on the terminal and transcribes the exchange
struct ConsoleSource<'a> {
    transcript: &'a mut Vec<String>,
    stdin: &'a mut io::StdinLock<'static>,
}

impl AnswerSource for ConsoleSource<'_> {
    fn answer(&mut self, card: &Card) -> Result<String> {
        let prompt = format!("Print the definition of \"{}\":", card.name());
        println!("{}", prompt);
        self.transcript.push(prompt);

        let mut line = String::new();
        let read = self.stdin.read_line(&mut line)?;
        if read == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended during a quiz",
            )));
        }
        strip_newline(&mut line);
        self.transcript.push(line.clone());
        Ok(line)
    }

    fn observe(&mut self, outcome: &AskOutcome) {
        let verdict = outcome.to_string();
        println!("{}", verdict);
        self.transcript.push(verdict);
    }
}

impl Session {
    fn new() -> Self {
        Self {
            store: CardStore::new(),
            transcript: Vec::new(),
            stdin: io::stdin().lock(),
        }
    }

    /// The prompt/dispatch loop. Ends on `exit` or end of input.
    fn run(&mut self) -> Result<()> {
        self.say("");
        loop {
            self.say(
                "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):",
            );
            let Some(action) = self.read_command()? else {
                break;
            };
            match action.as_str() {
                "add" => self.cmd_add()?,
                "remove" => self.cmd_remove()?,
                "import" => self.cmd_import()?,
                "export" => self.cmd_export()?,
                "ask" => self.cmd_ask()?,
                "hardest card" => self.cmd_hardest(),
                "reset stats" => self.cmd_reset(),
                "log" => self.cmd_log()?,
                "exit" => break,
                _ => self.say("Invalid selection. Try again."),
            }
        }
        Ok(())
    }

    /// Print a line and transcribe it
    fn say(&mut self, line: &str) {
        println!("{}", line);
        self.transcript.push(line.to_string());
    }

    /// Read one raw line, without transcribing. `None` on end of input.
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.stdin.read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        strip_newline(&mut line);
        Ok(Some(line))
    }

    /// Read a user reply, transcribing it verbatim
    fn read_reply(&mut self) -> Result<Option<String>> {
        let Some(line) = self.next_line()? else {
            return Ok(None);
        };
        self.transcript.push(line.clone());
        Ok(Some(line))
    }

    /// Read an action line; it is trimmed and lowercased before dispatch,
    /// and transcribed in that form
    fn read_command(&mut self) -> Result<Option<String>> {
        let Some(line) = self.next_line()? else {
            return Ok(None);
        };
        let action = line.trim().to_lowercase();
        self.transcript.push(action.clone());
        Ok(Some(action))
    }

    fn cmd_add(&mut self) -> Result<()> {
        self.say("The card:");
        let Some(name) = self.read_reply()? else {
            return Ok(());
        };
        // The name is checked before the definition is ever requested
        if self.store.contains_name(&name) {
            let message = Error::DuplicateName(name).to_string();
            self.say(&message);
            return Ok(());
        }

        self.say("The definition of the card:");
        let Some(definition) = self.read_reply()? else {
            return Ok(());
        };
        match self.store.add(&name, &definition) {
            Ok(()) => self.say(&format!(
                "The pair (\"{}\":\"{}\") has been added.",
                name, definition
            )),
            Err(err) => self.say(&err.to_string()),
        }
        Ok(())
    }

    fn cmd_remove(&mut self) -> Result<()> {
        self.say("Which card?");
        let Some(name) = self.read_reply()? else {
            return Ok(());
        };
        match self.store.remove(&name) {
            Ok(()) => self.say("The card has been removed."),
            Err(err) => self.say(&err.to_string()),
        }
        Ok(())
    }

    fn cmd_import(&mut self) -> Result<()> {
        let Some(name) = self.ask_file_name()? else {
            return Ok(());
        };
        self.import_deck(Path::new(&name));
        Ok(())
    }

    fn cmd_export(&mut self) -> Result<()> {
        let Some(name) = self.ask_file_name()? else {
            return Ok(());
        };
        self.export_deck(Path::new(&name));
        Ok(())
    }

    fn cmd_ask(&mut self) -> Result<()> {
        self.say("How many times to ask?");
        let Some(reply) = self.read_reply()? else {
            return Ok(());
        };
        let count: usize = match reply.trim().parse() {
            Ok(count) => count,
            Err(_) => {
                self.say("Invalid selection. Try again.");
                return Ok(());
            }
        };

        let mut source = ConsoleSource {
            transcript: &mut self.transcript,
            stdin: &mut self.stdin,
        };
        // Verdicts are rendered through `observe` as each one lands, so the
        // returned sequence is not needed here
        let _outcomes = self.store.ask(count, &mut source)?;
        Ok(())
    }

    fn cmd_hardest(&mut self) {
        let message = match self.store.hardest_cards() {
            None => "There are no cards with errors.".to_string(),
            Some(HardestCards { names, mistakes }) if names.len() == 1 => format!(
                "The hardest card is \"{}\". You have {} errors answering it.",
                names[0], mistakes
            ),
            Some(HardestCards { names, mistakes }) => {
                let list = names
                    .iter()
                    .map(|name| format!("\"{}\"", name))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "The hardest cards are {}. You have {} errors answering them.",
                    list, mistakes
                )
            }
        };
        self.say(&message);
    }

    fn cmd_reset(&mut self) {
        self.store.reset_stats();
        self.say("Card statistics have been reset.");
    }

    fn cmd_log(&mut self) -> Result<()> {
        let Some(name) = self.ask_file_name()? else {
            return Ok(());
        };
        // Said first so the saved transcript contains this line too
        self.say("The log has been saved.");

        let mut body = self.transcript.join("\n");
        body.push('\n');
        if let Err(err) = write_atomically(Path::new(&name), &body) {
            self.say(&err.to_string());
        }
        Ok(())
    }

    fn ask_file_name(&mut self) -> Result<Option<String>> {
        self.say("File name:");
        self.read_reply()
    }

    /// Load a deck file into the store, reporting the outcome on the terminal
    fn import_deck(&mut self, path: &Path) {
        let outcome = if path.exists() {
            std::fs::read_to_string(path)
                .map_err(Error::from)
                .and_then(|contents| self.store.import_lines(contents.lines()))
        } else {
            Err(Error::SourceNotFound)
        };
        match outcome {
            Ok(count) => self.say(&format!("{} cards have been loaded.", count)),
            Err(err) => self.say(&err.to_string()),
        }
    }

    /// Save the deck to a file, reporting the outcome on the terminal
    fn export_deck(&mut self, path: &Path) {
        let mut body = String::new();
        for record in self.store.export_records() {
            body.push_str(&record.to_line());
            body.push('\n');
        }
        match write_atomically(path, &body) {
            Ok(()) => self.say(&format!("{} cards have been saved.", self.store.len())),
            Err(err) => self.say(&err.to_string()),
        }
    }
}

/// Write a whole file via a temp file and rename, so an interrupted save
/// never truncates an existing deck or log
fn write_atomically(path: &Path, body: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(body.as_bytes())?;
    temp.flush()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    tracing::debug!("Wrote {} bytes to {:?}", body.len(), path);
    Ok(())
}

fn strip_newline(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_startup_args_both_flags_either_order() {
        let (import, export) =
            parse_startup_args(&strings(&["-export", "out.cards", "-import", "in.cards"]));
        assert_eq!(import, Some(PathBuf::from("in.cards")));
        assert_eq!(export, Some(PathBuf::from("out.cards")));
    }

    #[test]
    fn test_startup_args_adjacent_flags() {
        // `-import` directly followed by `-export` leaves the import unset,
        // while the export still picks up its own following argument.
        let (import, export) = parse_startup_args(&strings(&["-import", "-export", "out.cards"]));
        assert_eq!(import, None);
        assert_eq!(export, Some(PathBuf::from("out.cards")));
    }

    #[test]
    fn test_startup_args_trailing_flag_ignored() {
        let (import, export) = parse_startup_args(&strings(&["-import"]));
        assert_eq!(import, None);
        assert_eq!(export, None);
    }

    #[test]
    fn test_startup_args_empty() {
        let (import, export) = parse_startup_args(&[]);
        assert_eq!(import, None);
        assert_eq!(export, None);
    }
}
