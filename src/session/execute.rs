use super::Session;
use crate::channel::MatchOutcome;
use crate::errors::{
    Error,
    Result,
};
use crate::profile::keys::{
    CMD_DISABLE_PAGING,
    CMD_ENABLE_PAGING,
    CMD_GET_CONFIG,
    PROMPT_COMMAND,
};
use crate::profile::Prompt;
use crate::util::bytes::trim_cutset_right;
use regex::bytes::Regex;

/// The answer sent when a command is run with `confirm` set.
const CONFIRM_ANSWER: &str = "y";

/// Holds options for `execute_with_options`.
#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Prompts that end the command, the profile's command prompt when empty.
    pub prompts: Vec<Prompt>,
    /// Answer "y" to a confirmation question right after sending the command.
    pub confirm: bool,
}

/// Strip the echoed command line (first occurrence, as a whole line) and the trailing command
/// prompt from the raw output of `command`.
fn sanitize(
    command: &str,
    consumed: &str,
    command_prompt: &Prompt,
) -> Result<String> {
    let echo = Regex::new(&format!(r"(?m)^{}[ \t\r]*$\n", regex::escape(command))).map_err(
        |err| Error::InvalidPattern {
            key: String::from("echo"),
            source: err,
        },
    )?;

    let output = echo.replacen(consumed.as_bytes(), 1, &b""[..]);
    let output = command_prompt.strip(&output);

    Ok(String::from_utf8_lossy(trim_cutset_right(&output, b"\r\n")).into_owned())
}

impl Session {
    /// Run `command` and return its output, without the echoed command or the trailing prompt. A
    /// blank command returns blank output without touching the transport.
    ///
    /// # Errors
    ///
    /// Returns `Error::TransportTimeout` if no command prompt shows up in time.
    pub fn execute(
        &mut self,
        command: &str,
    ) -> Result<String> {
        self.execute_with_options(command, &Options::default())
    }

    /// Run `command` waiting for any of `options.prompts`, optionally confirming it.
    ///
    /// # Errors
    ///
    /// Returns `Error::TransportTimeout` if none of the prompts shows up in time, or
    /// `Error::NotOpen` on a closed session.
    pub fn execute_with_options(
        &mut self,
        command: &str,
        options: &Options,
    ) -> Result<String> {
        if command.is_empty() {
            return Ok(String::new());
        }

        self.ensure_open()?;

        self.trace(&format!("running command ({command})"));
        self.send_line(command)?;

        if options.confirm {
            self.send_line(CONFIRM_ANSWER)?;
        }

        let default_prompts;
        let prompts = if options.prompts.is_empty() {
            default_prompts = self.profile.prompts(&[PROMPT_COMMAND]);
            &default_prompts
        } else {
            &options.prompts
        };

        match self.channel.expect(prompts, self.args.timeout)? {
            MatchOutcome::Matched {
                key,
                matched,
                consumed,
                ..
            } => {
                self.trace(&format!("command ended on prompt '{key}'"));
                self.last_prompt = matched;

                sanitize(command, &consumed, self.profile.prompt(PROMPT_COMMAND))
            }
            MatchOutcome::NoMatch { consumed } => {
                self.trace("no prompt after command, giving up");

                Err(Error::TransportTimeout {
                    timeout: self.args.timeout,
                    consumed,
                })
            }
        }
    }

    /// Run the profile command stored under `key`. Keys the family does not define are no-ops.
    ///
    /// # Errors
    ///
    /// Returns any error `execute` returns.
    pub fn run_command(
        &mut self,
        key: &str,
    ) -> Result<String> {
        let command = self.profile.command(key).to_owned();

        self.execute(&command)
    }

    /// Turn terminal paging off.
    ///
    /// # Errors
    ///
    /// Returns any error `execute` returns.
    pub fn disable_paging(&mut self) -> Result<String> {
        self.run_command(CMD_DISABLE_PAGING)
    }

    /// Turn terminal paging back on.
    ///
    /// # Errors
    ///
    /// Returns any error `execute` returns.
    pub fn enable_paging(&mut self) -> Result<String> {
        self.run_command(CMD_ENABLE_PAGING)
    }

    /// Fetch the device configuration as raw text.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotEnabled` if the family needs enable, the session is not enabled and the
    /// connection type does not escalate on its own.
    pub fn get_config(&mut self) -> Result<String> {
        if self.profile.needs_enable() && !self.is_enabled() && !self.variant.auto_escalates {
            return Err(Error::NotEnabled {
                operation: CMD_GET_CONFIG.to_owned(),
            });
        }

        self.run_command(CMD_GET_CONFIG)
    }
}
