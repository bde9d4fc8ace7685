use netdevicers::profile::create_profile;
use netdevicers::session::{
    ConnectionType,
    Session,
};
use netdevicers::transport::scripted::{
    Scripted,
    Transcript,
};
use netdevicers::SessionBuilder;
use std::time::Duration;

pub const TIMEOUT: Duration = Duration::from_millis(100);

/// A session over a scripted transport, not yet opened.
pub fn scripted(
    connection_type: ConnectionType,
    vendor: &str,
    chunks: &[&str],
) -> (Session, Transcript) {
    let _logger = env_logger::builder().is_test(true).try_init();

    let transport = Scripted::new(chunks.iter().copied());
    let transcript = transport.transcript();

    let session = SessionBuilder::new(connection_type, create_profile(vendor).unwrap())
        .timeout(TIMEOUT)
        .settle_delay(Duration::ZERO)
        .read_delay(Duration::from_millis(1))
        .build_with_transport(transport);

    (session, transcript)
}

/// A telnet session, opened and logged in as admin/secret; the first four chunks are consumed by
/// the login dialog and paging setup.
#[allow(dead_code)]
pub fn logged_in_ios(rest: &[&str]) -> (Session, Transcript) {
    let mut chunks = vec![
        "User Access Verification\r\n\r\nUsername: ",
        "admin\r\nPassword: ",
        "\r\nrouter>",
        "terminal length 0\r\nrouter>",
    ];
    chunks.extend_from_slice(rest);

    let (mut session, transcript) = scripted(ConnectionType::Telnet, "IOS", &chunks);

    session.open("r1", None).unwrap();
    session.login("admin", "secret").unwrap();

    (session, transcript)
}
