use super::Session;
use crate::channel::MatchOutcome;
use crate::errors::{
    Error,
    NegotiationFailure,
    Result,
};
use crate::profile::keys::{
    CMD_DISABLE,
    CMD_ENABLE,
    PROMPT_COMMAND_ENABLED,
    PROMPT_COMMAND_NOT_ENABLED,
    PROMPT_PASSWORD,
    PROMPT_ROMMON,
};
use log::info;

/// Prompts the enable dialog waits for, most urgent first.
const ENABLE_PROMPTS: [&str; 4] = [
    PROMPT_ROMMON,
    PROMPT_PASSWORD,
    PROMPT_COMMAND_ENABLED,
    PROMPT_COMMAND_NOT_ENABLED,
];

#[derive(Default)]
struct Progress {
    password_sent: bool,
    extra_return_sent: bool,
    enable_resent: bool,
    wakeups: u8,
}

impl Session {
    /// Escalate to privileged mode. A no-op for families without an enable step.
    ///
    /// The password is sent once. If the password prompt comes back a single bare line is sent,
    /// since some devices need one before they show the new prompt; a third password prompt fails.
    ///
    /// # Errors
    ///
    /// Returns `Error::LoginFailed` if the password prompt keeps coming back, or
    /// `Error::EnableFailed` if the device stays unprivileged or silent.
    pub fn enable(
        &mut self,
        password: &str,
    ) -> Result<()> {
        if !self.profile.needs_enable() {
            self.trace("family has no enable step, nothing to do");

            return Ok(());
        }

        self.ensure_open()?;

        info!("enabling session");

        let prompts = self.profile.prompts(&ENABLE_PROMPTS);
        let enable = self.profile.command(CMD_ENABLE).to_owned();
        let mut progress = Progress::default();

        self.trace("sending enable command");
        self.send_line(&enable)?;

        loop {
            self.trace("looking for a password or command prompt");

            match self.channel.expect(&prompts, self.args.timeout)? {
                MatchOutcome::Matched { index: 0, matched, .. } => {
                    self.trace("found rommon prompt, nothing to enable");
                    self.last_prompt = matched;

                    return Ok(());
                }
                MatchOutcome::Matched { index: 1, .. } => {
                    if !progress.password_sent {
                        self.trace("found password prompt, sending enable password");
                        self.send_line(password)?;
                        progress.password_sent = true;
                    } else if !progress.extra_return_sent {
                        self.trace("password prompt seen again, sending an extra return");
                        self.send_line("")?;
                        progress.extra_return_sent = true;
                    } else {
                        self.trace("password prompt seen a third time, enable failed");

                        return Err(Error::LoginFailed {
                            reason: NegotiationFailure::RepeatedPrompt {
                                key: PROMPT_PASSWORD.to_owned(),
                                attempts: 3,
                            },
                        });
                    }
                }
                MatchOutcome::Matched { index: 2, matched, .. } => {
                    self.trace("found enabled command prompt, enabled");
                    self.last_prompt = matched;

                    return Ok(());
                }
                MatchOutcome::Matched { matched, .. } => {
                    self.last_prompt = matched;

                    if progress.enable_resent {
                        self.trace("still not enabled, enable failed");

                        return Err(Error::EnableFailed {
                            reason: NegotiationFailure::RepeatedPrompt {
                                key: PROMPT_COMMAND_NOT_ENABLED.to_owned(),
                                attempts: 2,
                            },
                        });
                    }

                    self.trace("found unprivileged command prompt, sending enable again");
                    self.send_line(&enable)?;
                    progress.enable_resent = true;
                }
                MatchOutcome::NoMatch { .. } => {
                    if progress.wakeups > 0 {
                        self.trace("no prompt after wakeup probe, enable failed");

                        return Err(Error::EnableFailed {
                            reason: NegotiationFailure::NoPrompt {
                                wakeups: progress.wakeups,
                            },
                        });
                    }

                    self.trace("no prompt found, trying to wake the device up");
                    self.wakeup()?;
                    progress.wakeups += 1;
                }
            }
        }
    }

    /// Drop out of privileged mode. A no-op, sending nothing, for families without an enable step.
    ///
    /// # Errors
    ///
    /// Returns `Error::DisableFailed` if the prompt after the disable command still looks
    /// privileged, or any error `execute` returns.
    pub fn disable(&mut self) -> Result<()> {
        if !self.profile.needs_enable() {
            self.trace("family has no enable step, nothing to disable");

            return Ok(());
        }

        info!("disabling session");

        self.run_command(CMD_DISABLE)?;

        if self.is_enabled() {
            return Err(Error::DisableFailed {
                last_prompt: self.last_prompt.clone(),
            });
        }

        Ok(())
    }
}
