use crate::egg::EggDetector;
use crate::input::{self, Action, Command};
use crate::view::{self, View};
use datitos_runtime::Runtime;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{DefaultEditor, Editor};

#[derive(Debug)]
pub struct Console {}

impl Console {
    fn prompt(
        rl: &mut Editor<(), FileHistory>,
        runtime: &Runtime,
    ) -> Result<String, ReadlineError> {
        let mut prompt_str = String::from("\n");
        prompt_str.push_str(runtime.database.section_name(runtime.current_section()));
        prompt_str.push_str(" > ");

        rl.readline(&prompt_str)
    }

    pub fn start(mut runtime: Runtime) {
        let mut rl = DefaultEditor::new().unwrap();
        rl.load_history("history.txt").unwrap_or_default();

        let mut view = View::interactive();
        let mut egg = EggDetector::new();
        view::render_pending(&mut runtime, &mut view);

        loop {
            let read_line = Self::prompt(&mut rl, &runtime);

            match read_line {
                Ok(line) => {
                    rl.add_history_entry(line.as_str()).unwrap();
                    if !run_command(line, &mut runtime, &mut view, &mut egg, &mut rl) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => break,
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    println!("{:?}", err);
                    break;
                }
            }
        }

        rl.save_history("history.txt").unwrap();
    }
}

fn run_command(
    line: String,
    runtime: &mut Runtime,
    view: &mut View,
    egg: &mut EggDetector,
    rl: &mut Editor<(), FileHistory>,
) -> bool {
    let trimmed = line.trim();

    let Some(command) = input::parse_command(trimmed) else {
        println!("Unknown command: {}", trimmed);
        return true;
    };

    match command {
        Command::Quit => return false,
        Command::Empty => {}
        Command::Wait(ms) => {
            let target = runtime.now_ms() + ms;
            runtime.tick(target);
        }
        Command::Chord(chord) if input::action_for(chord) == Some(Action::OpenSearch) => {
            // Mod+F obtains its query synchronously, like a prompt dialog.
            if let Ok(query) = rl.readline("search > ") {
                runtime.search(&query);
            }
        }
        other => crate::apply_command(runtime, view, egg, &other, trimmed),
    }

    // The console settles between lines; the user's typing time stands in
    // for the transition delays.
    runtime.settle();
    view::render_pending(runtime, view);
    true
}
