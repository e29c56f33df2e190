//! Application registry
//!
//! Maps the friendly names the dashboard sends to the application names the
//! target machine knows. Only values from this table are ever formatted into
//! a shell command; raw request input never is.

/// Recognized applications: lowercase key → target application name
const APPLICATIONS: &[(&str, &str)] = &[
    ("facetime", "FaceTime"),
    ("whatsapp", "WhatsApp"),
    ("docker", "Docker"),
    ("terminal", "Terminal"),
];

/// Fixed lookup from friendly name to launch target
#[derive(Debug, Clone, Copy, Default)]
pub struct AppRegistry {
    entries: &'static [(&'static str, &'static str)],
}

impl AppRegistry {
    /// The built-in registry
    pub fn new() -> Self {
        Self {
            entries: APPLICATIONS,
        }
    }

    /// Resolve a friendly name (case-insensitive) to its target application
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        let key = name.to_lowercase();
        self.entries
            .iter()
            .find(|(friendly, _)| *friendly == key)
            .map(|(_, target)| *target)
    }

    /// Build the command that launches a resolved target
    pub fn launch_command(target: &str) -> String {
        format!("open -a \"{}\"", target)
    }

    /// Recognized friendly names with their targets, in display order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}
