#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

use super::CreativeKind;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .filter(|e| return !e.is_empty())
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit() || cmd.is_logout() || cmd.is_help() || cmd.creative_kind().is_some() {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_logout(&self) -> bool {
        return ["/logout", "/signout"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn creative_kind(&self) -> Option<CreativeKind> {
        if ["/p", "/poem"].contains(&self.command.as_str()) {
            return Some(CreativeKind::Poem);
        }
        if ["/s", "/song"].contains(&self.command.as_str()) {
            return Some(CreativeKind::Song);
        }

        return None;
    }

    /// Remaining arguments joined back together, used as a creative topic.
    pub fn topic(&self) -> Option<String> {
        if self.args.is_empty() {
            return None;
        }

        return Some(self.args.join(" "));
    }
}
