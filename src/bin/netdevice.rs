extern crate netdevicers;

use clap::Parser;
use env_logger::{
    Builder,
    Target,
};
use log::{
    error,
    LevelFilter,
};
use netdevicers::session::{
    ConnectionType,
    Session,
};
use netdevicers::SessionBuilder;
use std::process::ExitCode;
use std::time::Duration;

/// Log in to a network device, enable when an enable password is given, run one command and print
/// its output.
#[derive(Parser, Debug)]
#[command(name = "netdevice", version)]
struct Cli {
    /// Print negotiation trace lines to stderr
    #[arg(short, long)]
    debug: bool,

    /// Connection type, "telnet" or "ssh"
    #[arg(short = 't', long = "type", default_value = "telnet")]
    connection_type: String,

    /// Port to connect to, the connection type's default if unset
    #[arg(short, long)]
    port: Option<u16>,

    /// Seconds to wait for each prompt
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Device host name or address
    host: String,

    /// Device family, ex: IOS, NXOS, CatOS, Pix, ASA, BB
    vendor: String,

    /// Login username
    username: String,

    /// Login password
    password: String,

    /// [ENABLE_PASSWORD] COMMAND
    #[arg(required = true, num_args = 1..=2, value_names = ["ENABLE_PASSWORD", "COMMAND"])]
    rest: Vec<String>,
}

impl Cli {
    /// The enable password, if one was given; without it the command runs unprivileged.
    fn enable_password(&self) -> Option<&str> {
        match self.rest.as_slice() {
            [enable_password, _] => Some(enable_password.as_str()),
            _ => None,
        }
    }

    fn command(&self) -> &str {
        self.rest.last().map_or("", String::as_str)
    }
}

fn init_logging(debug: bool) {
    let mut builder = Builder::from_default_env();

    builder.target(Target::Stderr);

    if debug {
        builder.filter_level(LevelFilter::Trace);
    }

    builder.init();
}

fn run_dialog(
    session: &mut Session,
    cli: &Cli,
) -> netdevicers::Result<String> {
    session.open(&cli.host, cli.port)?;
    session.login(&cli.username, &cli.password)?;

    if let Some(enable_password) = cli.enable_password() {
        session.enable(enable_password)?;
    }

    session.execute(cli.command())
}

fn run(cli: &Cli) -> netdevicers::Result<String> {
    let connection_type: ConnectionType = cli.connection_type.parse()?;

    let mut builder = SessionBuilder::from_names(&cli.connection_type, &cli.vendor)?
        .timeout(Duration::from_secs(cli.timeout));

    if connection_type == ConnectionType::Ssh {
        builder = builder.user(&cli.username).ssh_strict_key(false);
    }

    if cli.debug {
        builder = builder.trace_sink(|line| eprintln!("DEBUG: {line}"));
    }

    let mut session = builder.build();

    let result = run_dialog(&mut session, cli);

    if let Err(err) = session.close() {
        error!("failed closing session, error: {}", err);
    }

    result
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _printed = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.debug);

    match run(&cli) {
        Ok(output) => {
            println!("{output}");

            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("netdevice: {err}");

            ExitCode::FAILURE
        }
    }
}
