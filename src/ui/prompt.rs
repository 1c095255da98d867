use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use std::io;

pub struct Repl {
    line_editor: Reedline,
    prompt: DefaultPrompt,
}

impl Repl {
    pub fn new() -> Self {
        Self {
            line_editor: Reedline::create(),
            prompt: DefaultPrompt::new(
                DefaultPromptSegment::Basic("numbers".to_string()),
                DefaultPromptSegment::Empty,
            ),
        }
    }

    /// Next line typed by the user; `None` on Ctrl-D / Ctrl-C.
    pub fn read_line(&mut self) -> Result<Option<String>, io::Error> {
        match self.line_editor.read_line(&self.prompt) {
            Ok(Signal::Success(buffer)) => Ok(Some(buffer)),
            Ok(_) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
