/// Anything that can render the monitor's single line of text.
///
/// Implementations run on the UI thread only; they may record the calling
/// thread to assert that contract.
pub trait DisplayLabel: Send {
    fn set_text(&mut self, text: &str);
}

/// Label for terminal sessions; one line per update
pub struct ConsoleLabel;

impl DisplayLabel for ConsoleLabel {
    fn set_text(&mut self, text: &str) {
        println!("heart rate: {} bpm", text);
    }
}
