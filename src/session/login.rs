use super::{
    PrivilegeState,
    Session,
};
use crate::channel::MatchOutcome;
use crate::errors::{
    Error,
    NegotiationFailure,
    Result,
};
use crate::profile::keys::{
    PROMPT_COMMAND,
    PROMPT_INITIAL_CONFIG,
    PROMPT_LOGIN,
    PROMPT_PASSWORD,
    PROMPT_ROMMON,
    PROMPT_USERNAME,
};
use log::info;
use std::thread;

/// Prompts the login dialog waits for, most urgent first.
const LOGIN_PROMPTS: [&str; 6] = [
    PROMPT_ROMMON,
    PROMPT_USERNAME,
    PROMPT_LOGIN,
    PROMPT_PASSWORD,
    PROMPT_COMMAND,
    PROMPT_INITIAL_CONFIG,
];

/// The vendor that can only control paging from privileged mode.
const PAGING_NEEDS_ENABLE_VENDOR: &str = "ASA";

enum Event {
    Rommon(String),
    Username(String),
    Password,
    Command(String),
    InitialConfig,
    Timeout,
}

impl Event {
    fn from_outcome(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Matched { index, matched, .. } => match index {
                0 => Self::Rommon(matched),
                1 => Self::Username(LOGIN_PROMPTS[1].to_owned()),
                2 => Self::Username(LOGIN_PROMPTS[2].to_owned()),
                3 => Self::Password,
                4 => Self::Command(matched),
                _ => Self::InitialConfig,
            },
            MatchOutcome::NoMatch { .. } => Self::Timeout,
        }
    }
}

#[derive(Default)]
struct Progress {
    username_sent: bool,
    password_sent: bool,
    wizard_declined: bool,
    wakeups: u8,
}

impl Session {
    /// Drive the login dialog until a command (or rommon) prompt shows up, then turn paging off.
    ///
    /// # Errors
    ///
    /// Returns `Error::LoginFailed` if a username, password or setup wizard prompt comes back
    /// after being answered, or if no prompt shows up even after one wakeup probe. Returns `Error::NotOpen`
    /// if the session was never opened.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<()> {
        self.ensure_open()?;

        info!("logging in as '{}'", username);

        let prompts = self.profile.prompts(&LOGIN_PROMPTS);
        let mut progress = Progress::default();

        loop {
            self.trace("looking for a login prompt, any kind of prompt");

            let outcome = self.channel.expect(&prompts, self.args.timeout)?;

            match Event::from_outcome(outcome) {
                Event::Rommon(matched) => {
                    self.trace("found rommon prompt, nothing left to log in to");
                    self.last_prompt = matched;

                    break;
                }
                Event::Username(key) => {
                    if progress.username_sent {
                        self.trace("username prompt seen again, login failed");

                        return Err(Error::LoginFailed {
                            reason: NegotiationFailure::RepeatedPrompt { key, attempts: 2 },
                        });
                    }

                    self.trace("found username prompt, sending username");
                    self.send_line(username)?;
                    progress.username_sent = true;
                }
                Event::Password => {
                    if progress.password_sent {
                        self.trace("password prompt seen again, login failed");

                        return Err(Error::LoginFailed {
                            reason: NegotiationFailure::RepeatedPrompt {
                                key: PROMPT_PASSWORD.to_owned(),
                                attempts: 2,
                            },
                        });
                    }

                    self.trace("found password prompt, sending password");
                    self.send_line(password)?;
                    progress.password_sent = true;
                }
                Event::Command(matched) => {
                    self.trace("found command prompt, logged in");
                    self.last_prompt = matched;

                    break;
                }
                Event::InitialConfig => {
                    if progress.wizard_declined {
                        self.trace("setup wizard seen again, login failed");

                        return Err(Error::LoginFailed {
                            reason: NegotiationFailure::RepeatedPrompt {
                                key: PROMPT_INITIAL_CONFIG.to_owned(),
                                attempts: 2,
                            },
                        });
                    }

                    self.trace("found setup wizard, declining it");
                    self.send_line("no")?;
                    progress.wizard_declined = true;

                    thread::sleep(self.args.settle_delay);
                    self.send_line("")?;
                    self.wakeup()?;

                    if self.variant.initial_config_ends_login {
                        break;
                    }
                }
                Event::Timeout => {
                    if progress.wakeups > 0 {
                        self.trace("no prompt after wakeup probe, login failed");

                        return Err(Error::LoginFailed {
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

        if self.privilege_state() == PrivilegeState::Rommon {
            self.trace("at rommon, no paging to disable");

            return Ok(());
        }

        if self.profile.vendor() == PAGING_NEEDS_ENABLE_VENDOR {
            self.trace("skipping paging setup until privileged mode");

            return Ok(());
        }

        self.disable_paging().map(|_| ())
    }
}
