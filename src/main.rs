use std::process::ExitCode;

use argh::FromArgs;
use log::debug;

use pdh_counters::app::{Action, DEFAULT_OBJECT, Settings};
use pdh_counters::{DetailLevel, FormatFlags, PollOptions};

/// Browse performance counters and print their values every interval, until Ctrl+C
#[derive(Debug, FromArgs)]
struct Cli {
    /// print all counter objects and exit.
    #[argh(switch)]
    list_objects: bool,
    /// print the counters of the object and exit.
    #[argh(switch)]
    list_counters: bool,
    /// print the instances of the object and exit.
    #[argh(switch)]
    list_instances: bool,
    /// counter object name, "Network Interface" by default.
    #[argh(option, default = "DEFAULT_OBJECT.to_owned()")]
    object: String,
    /// instance name; the first instance of the object by default.
    #[argh(option)]
    instance: Option<String>,
    /// counter to poll, may be repeated; "Bytes Received/sec" and "Bytes Sent/sec" by default.
    #[argh(option)]
    counter: Vec<String>,
    /// time in ms between two samples.
    #[argh(option, default = "1000")]
    interval: u64,
    /// machine to query instead of the local one.
    #[argh(option)]
    machine: Option<String>,
    /// detail level: novice, advanced, expert or wizard.
    #[argh(option, default = "DetailLevel::Wizard")]
    detail: DetailLevel,
    /// do not cap percentages at 100.
    #[argh(switch)]
    no_cap: bool,
    /// multiply values by 1000.
    #[argh(switch)]
    scale_1000: bool,
    /// do not apply the default scaling factor of counters.
    #[argh(switch)]
    no_scale: bool,
    /// digits after the decimal point.
    #[argh(option)]
    precision: Option<usize>,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        let action = if cli.list_objects {
            Action::ListObjects
        } else if cli.list_counters {
            Action::ListCounters
        } else if cli.list_instances {
            Action::ListInstances
        } else {
            Action::Poll
        };

        let mut format = FormatFlags::empty();
        format.set(FormatFlags::NOCAP100, cli.no_cap);
        format.set(FormatFlags::MULTIPLY_1000, cli.scale_1000);
        format.set(FormatFlags::NOSCALE, cli.no_scale);

        let defaults = Settings::default();
        Settings {
            action,
            object: cli.object,
            instance: cli.instance,
            counters: if cli.counter.is_empty() {
                defaults.counters
            } else {
                cli.counter
            },
            machine: cli.machine,
            detail: cli.detail,
            poll: PollOptions {
                format,
                precision: cli.precision,
                ..PollOptions::with_interval_ms(cli.interval)
            },
        }
    }
}

#[cfg(windows)]
mod ctrl {
    use std::sync::Mutex;

    use lazy_static::lazy_static;
    use log::{error, info};

    use pdh_counters::StopHandle;
    use win_high::console::{SetConsoleCtrlHandler_Safe, is_stop_event};
    use win_high::prelude::BOOL;

    lazy_static! {
        /// Stop handle of the polling loop, once it has started.
        static ref STOP: Mutex<Option<StopHandle>> = Mutex::new(None);
    }

    unsafe extern "system" fn on_console_event(ctrl_type: u32) -> BOOL {
        if !is_stop_event(ctrl_type) {
            return BOOL::from(false);
        }
        let stop = match STOP.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        match stop {
            Some(stop) => {
                info!("Stopping after the current sample");
                stop.stop();
                BOOL::from(true)
            }
            // not polling yet, let the default handler end the process
            None => BOOL::from(false),
        }
    }

    pub fn install() {
        if let Err(e) = SetConsoleCtrlHandler_Safe(on_console_event) {
            error!("{}", e);
        }
    }

    pub fn arm(stop: StopHandle) {
        if let Ok(mut slot) = STOP.lock() {
            *slot = Some(stop);
        }
    }
}

#[cfg(windows)]
fn run(settings: Settings) -> ExitCode {
    use pdh_counters::pdh::Pdh;

    ctrl::install();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match pdh_counters::app::run(Pdh, &settings, &mut out, ctrl::arm) {
        Ok(()) => ExitCode::SUCCESS,
        // already reported where it happened
        Err(_) => ExitCode::FAILURE,
    }
}

#[cfg(not(windows))]
fn run(_settings: Settings) -> ExitCode {
    log::error!("Performance Data Helper is only available on Windows");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli: Cli = argh::from_env();
    debug!("{:?}", cli);
    run(cli.into())
}
