mod common;

use common::{
    logged_in_ios,
    scripted,
};
use netdevicers::errors::{
    Error,
    NegotiationFailure,
};
use netdevicers::profile::{
    Layer,
    ProfileRegistry,
};
use netdevicers::session::{
    ConnectionType,
    PrivilegeState,
};
use netdevicers::transport::scripted::Scripted;
use netdevicers::SessionBuilder;
use std::sync::{
    Arc,
    Mutex,
};

#[test]
fn username_password_then_command_prompt() {
    let (session, transcript) = logged_in_ios(&[]);

    assert_eq!(session.last_prompt(), "router>");
    assert!(session.is_logged_in());
    assert!(!session.is_enabled());
    assert_eq!(session.privilege_state(), PrivilegeState::User);
    assert_eq!(
        transcript.writes(),
        ["admin\r\n", "secret\r\n", "terminal length 0\r\n"]
    );
    assert_eq!(transcript.opened(), [(String::from("r1"), 23)]);
}

#[test]
fn repeated_username_prompt_fails_without_a_third_send() {
    let (mut session, transcript) =
        scripted(ConnectionType::Telnet, "IOS", &["Username: ", "Username: ", "Username: "]);

    session.open("r1", None).unwrap();
    let err = session.login("admin", "wrong").unwrap_err();

    assert!(matches!(
        err,
        Error::LoginFailed {
            reason: NegotiationFailure::RepeatedPrompt { ref key, attempts: 2 }
        } if key == "username"
    ));
    assert_eq!(transcript.writes(), ["admin\r\n"]);
}

#[test]
fn repeated_password_prompt_fails() {
    let (mut session, transcript) =
        scripted(ConnectionType::Ssh, "IOS", &["admin@r1's password: ", "Password: "]);

    session.open("r1", None).unwrap();
    let err = session.login("admin", "wrong").unwrap_err();

    assert!(matches!(err, Error::LoginFailed { .. }));
    assert_eq!(transcript.writes(), ["wrong\n"]);
    assert_eq!(transcript.opened(), [(String::from("r1"), 22)]);
}

#[test]
fn silent_device_gets_exactly_one_wakeup() {
    let (mut session, transcript) = scripted(ConnectionType::Telnet, "IOS", &[""]);

    session.open("r1", Some(2323)).unwrap();
    let err = session.login("admin", "secret").unwrap_err();

    assert!(matches!(
        err,
        Error::LoginFailed {
            reason: NegotiationFailure::NoPrompt { wakeups: 1 }
        }
    ));
    assert_eq!(transcript.writes(), ["\r\n\r\n"]);
    assert_eq!(transcript.opened(), [(String::from("r1"), 2323)]);
}

#[test]
fn wakeup_recovers_a_quiet_device() {
    let (mut session, transcript) =
        scripted(ConnectionType::Ssh, "NXOS", &["", "\r\nswitch# ", "terminal length 0\nswitch# "]);

    session.open("sw1", None).unwrap();
    session.login("admin", "secret").unwrap();

    assert_eq!(session.last_prompt(), "switch# ");
    assert!(session.is_enabled());
    assert_eq!(transcript.writes(), ["\r\n", "terminal length 0\n"]);
}

#[test]
fn rommon_ends_login_without_paging() {
    let (mut session, transcript) = scripted(ConnectionType::Telnet, "IOS", &["\r\nrommon 1 > "]);

    session.open("r1", None).unwrap();
    session.login("admin", "secret").unwrap();

    assert_eq!(session.privilege_state(), PrivilegeState::Rommon);
    assert!(!session.is_logged_in());
    assert_eq!(transcript.write_count(), 0);
}

#[test]
fn setup_wizard_is_declined_and_login_resumes() {
    let (mut session, transcript) = scripted(
        ConnectionType::Ssh,
        "IOS",
        &[
            "Would you like to enter the initial configuration dialog? [yes/no]: ",
            "",
            "",
            "\r\nRouter>",
            "terminal length 0\nRouter>",
        ],
    );

    session.open("r1", None).unwrap();
    session.login("admin", "secret").unwrap();

    assert_eq!(session.last_prompt(), "Router>");
    assert_eq!(
        transcript.writes(),
        ["no\n", "\n", "\r\n", "terminal length 0\n"]
    );
}

#[test]
fn setup_wizard_coming_back_fails_login() {
    let wizard = "Would you like to enter the initial configuration dialog? [yes/no]: ";
    let chunks = [wizard, "", ""].repeat(20);

    let (mut session, transcript) = scripted(ConnectionType::Ssh, "IOS", &chunks);

    session.open("r1", None).unwrap();
    let err = session.login("admin", "secret").unwrap_err();

    assert!(matches!(
        err,
        Error::LoginFailed {
            reason: NegotiationFailure::RepeatedPrompt { ref key, attempts: 2 }
        } if key == "initialconfig"
    ));
    assert_eq!(transcript.writes(), ["no\n", "\n", "\r\n"]);
}

#[test]
fn telnet_setup_wizard_ends_login() {
    let (mut session, transcript) = scripted(
        ConnectionType::Telnet,
        "IOS",
        &[
            "Would you like to enter the initial configuration dialog? [yes/no]: ",
            "",
            "",
            "\r\nRouter>",
            "terminal length 0\r\nRouter>",
        ],
    );

    session.open("r1", None).unwrap();
    session.login("admin", "secret").unwrap();

    assert_eq!(session.last_prompt(), "Router>");
    assert_eq!(
        transcript.writes(),
        ["no\r\n", "\r\n", "\r\n\r\n", "terminal length 0\r\n"]
    );
}

#[test]
fn asa_defers_paging() {
    let (mut session, transcript) =
        scripted(ConnectionType::Telnet, "ASA", &["Username: ", "Password: ", "asa> "]);

    session.open("fw1", None).unwrap();
    session.login("admin", "secret").unwrap();

    assert_eq!(session.last_prompt(), "asa> ");
    assert_eq!(transcript.writes(), ["admin\r\n", "secret\r\n"]);
}

#[test]
fn login_needs_an_open_session() {
    let (mut session, transcript) = scripted(ConnectionType::Telnet, "IOS", &["Username: "]);

    assert!(matches!(session.login("admin", "secret"), Err(Error::NotOpen)));
    assert!(transcript.opened().is_empty());
}

#[test]
fn wakeup_on_open_for_families_that_need_it() {
    let mut registry = ProfileRegistry::builtin().unwrap();
    registry.register(
        "Quiet",
        Layer {
            needs_wakeup: Some(true),
            ..Layer::default()
        },
    );

    let transport = Scripted::new([""]);
    let transcript = transport.transcript();
    let mut session = SessionBuilder::new(ConnectionType::Telnet, registry.create("Quiet").unwrap())
        .build_with_transport(transport);

    session.open("r1", None).unwrap();

    assert_eq!(transcript.writes(), ["\r\n\r\n"]);
}

#[test]
fn trace_sink_sees_every_branch() {
    let lines = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink_lines = Arc::clone(&lines);

    let transport = Scripted::new(["Username: ", "Password: ", "router>", "router>"]);
    let mut session = SessionBuilder::from_names("telnet", "IOS")
        .unwrap()
        .timeout(common::TIMEOUT)
        .trace_sink(move |line| sink_lines.lock().unwrap().push(line.to_owned()))
        .build_with_transport(transport);

    session.open("r1", None).unwrap();
    session.login("admin", "secret").unwrap();

    let lines = lines.lock().unwrap();

    assert!(lines.iter().any(|l| l == "found username prompt, sending username"));
    assert!(lines.iter().any(|l| l == "found password prompt, sending password"));
    assert!(lines.iter().any(|l| l == "found command prompt, logged in"));
    assert!(lines.iter().any(|l| l.starts_with("running command (terminal length 0)")));
}

#[test]
fn factory_rejects_unknown_names() {
    assert!(matches!(
        SessionBuilder::from_names("serial", "IOS"),
        Err(Error::UnsupportedConnectionType { .. })
    ));
    assert!(matches!(
        SessionBuilder::from_names("ssh", "JunOS"),
        Err(Error::UnsupportedDeviceClass { .. })
    ));
}
