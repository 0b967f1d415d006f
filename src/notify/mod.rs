use colored::Colorize;

/// A one-way message from the workflow to whoever is presenting it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Stage label, e.g. "Writing file 3 of 9: main.py"
    Progress(String),
    /// Something the user should know about that does not stop the run
    Info(String),
    Success(String),
    Error(String),
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);

    fn progress(&mut self, label: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::Progress(label.into()));
    }

    fn info(&mut self, text: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notification::Info(text.into()));
    }
}

/// Prints notifications to the terminal
pub struct ConsoleNotifier {
    verbose: bool,
}

impl ConsoleNotifier {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::Progress(label) => {
                if self.verbose {
                    println!("{} {}", "→".cyan(), label);
                }
            }
            Notification::Info(text) => println!("{} {}", "⚠".yellow().bold(), text),
            Notification::Success(text) => println!("{} {}", "✓".green().bold(), text),
            Notification::Error(text) => eprintln!("{} {}", "✗".red().bold(), text),
        }
    }
}

/// Keeps every notification, for asserting on in tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub received: Vec<Notification>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn infos(&self) -> Vec<&str> {
        self.received
            .iter()
            .filter_map(|n| match n {
                Notification::Info(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.received
            .iter()
            .filter_map(|n| match n {
                Notification::Error(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.received.push(notification);
    }
}
