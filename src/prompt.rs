use inksac::prelude::*;

use crate::core::env::Environment;

const UNKNOWN_USER: &str = "unknown";
const UNKNOWN_HOST: &str = "localhost";
const UNKNOWN_DIR: &str = "?";

/// What the prompt shows, fetched fresh every cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFacts {
    pub user: Option<String>,
    pub host: Option<String>,
    pub cwd: Option<String>,
    pub home: Option<String>,
}

impl PromptFacts {
    pub fn gather(env: &dyn Environment) -> Self {
        Self {
            user: env.user_name(),
            host: env.host_name(),
            cwd: env.current_dir().ok(),
            home: env.home_dir(),
        }
    }
}

/// The two prompt lines: a header printed as-is and the line handed to the
/// editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub header: String,
    pub input: String,
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Frame,
    Identity,
    Location,
}

impl Tone {
    fn style(self) -> Style {
        let color = match self {
            Tone::Frame => Color::White,
            Tone::Identity => Color::Green,
            Tone::Location => Color::Blue,
        };
        Style::builder().foreground(color).bold().build()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Prompt {
    color: bool,
}

impl Prompt {
    /// Colors are used unless `plain` is set or the terminal has none.
    pub fn new(plain: bool) -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color: !plain && !matches!(support, ColorSupport::NoColor),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn render(&self, facts: &PromptFacts) -> RenderedPrompt {
        let user = facts.user.as_deref().unwrap_or(UNKNOWN_USER);
        let host = facts.host.as_deref().unwrap_or(UNKNOWN_HOST);
        let dir = match &facts.cwd {
            Some(cwd) => abbreviate_home(cwd, facts.home.as_deref()),
            None => UNKNOWN_DIR.to_string(),
        };
        let marker = if user == "root" { '#' } else { '%' };

        RenderedPrompt {
            header: format!(
                "{}{} {}",
                self.paint("╭─", Tone::Frame),
                self.paint(&format!("{}@{}", user, host), Tone::Identity),
                self.paint(&dir, Tone::Location),
            ),
            input: format!(
                "{}{} ",
                self.paint("╰─", Tone::Frame),
                self.paint(&marker.to_string(), Tone::Frame)
            ),
        }
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        text.style(tone.style()).to_string()
    }
}

/// Shows `home`, or anything below it, with a leading `~`.
pub fn abbreviate_home(cwd: &str, home: Option<&str>) -> String {
    let Some(home) = home.map(|h| h.trim_end_matches('/')).filter(|h| !h.is_empty()) else {
        return cwd.to_string();
    };

    match cwd.strip_prefix(home) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{}", rest),
        _ => cwd.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::{MemoryEnvironment, HOME};

    fn facts(user: &str, cwd: &str) -> PromptFacts {
        PromptFacts {
            user: Some(user.to_string()),
            host: Some("box".to_string()),
            cwd: Some(cwd.to_string()),
            home: Some("/home/u".to_string()),
        }
    }

    #[test]
    fn test_plain_render() {
        let rendered = Prompt::plain().render(&facts("u", "/home/u/src"));
        assert_eq!(rendered.header, "╭─u@box ~/src");
        assert_eq!(rendered.input, "╰─% ");
    }

    #[test]
    fn test_root_marker() {
        let rendered = Prompt::plain().render(&facts("root", "/etc"));
        assert_eq!(rendered.header, "╭─root@box /etc");
        assert_eq!(rendered.input, "╰─# ");
    }

    #[test]
    fn test_placeholders() {
        let rendered = Prompt::plain().render(&PromptFacts::default());
        assert_eq!(rendered.header, "╭─unknown@localhost ?");
    }

    #[test]
    fn test_abbreviate_home() {
        assert_eq!(abbreviate_home("/home/u", Some("/home/u")), "~");
        assert_eq!(abbreviate_home("/home/u/a/b", Some("/home/u/")), "~/a/b");
        assert_eq!(abbreviate_home("/home/user2", Some("/home/u")), "/home/user2");
        assert_eq!(abbreviate_home("/tmp", None), "/tmp");
        assert_eq!(abbreviate_home("/tmp", Some("/")), "/tmp");
    }

    #[test]
    fn test_gather_from_environment() {
        let env = MemoryEnvironment::new("/home/u")
            .with_var(HOME, "/home/u")
            .with_user("u")
            .with_host("box");
        let gathered = PromptFacts::gather(&env);

        assert_eq!(gathered, facts("u", "/home/u"));
    }
}
