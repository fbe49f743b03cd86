use log::info;
use clap::Parser;

use gj_matrix::dense::{rref_in_place, DEFAULT_TOLERANCE};
use super::input;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Entries of magnitude below this are snapped to exact zero.
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    #[arg(long, default_value = "0")]
    pub log: u8,
}

impl CliArgs {
    fn log_level(&self) -> log::LevelFilter {
        use log::LevelFilter::*;
        match self.log {
            1 => Info,
            2 => Debug,
            3 => Trace,
            _ => Off,
        }
    }
}

pub struct App {
    pub args: CliArgs
}

impl App {
    pub fn new() -> Self {
        let args = CliArgs::parse();
        App { args }
    }

    pub fn run(&self) -> Result<String, Box<dyn std::error::Error>> {
        self.init_logger();
        info!("args: {:?}", self.args);

        let a = input::read_matrix()?;

        let mut lines = vec![String::from("Original matrix:")];
        lines.extend(a.format_rows());

        let (e, time) = measure(||
            rref_in_place(a, self.args.tolerance)
        );
        info!("time: {:?}", time);

        lines.push(String::new());
        lines.push(String::from("Reduced row-echelon form (Gauss-Jordan):"));
        lines.extend(e.format_rows());

        Ok(lines.join("\n"))
    }

    fn init_logger(&self) {
        use simplelog::*;

        let mut cb = simplelog::ConfigBuilder::new();
        cb.set_location_level(LevelFilter::Off);
        cb.set_target_level(LevelFilter::Off);
        cb.set_thread_level(LevelFilter::Off);
        cb.set_level_color(Level::Trace, Some(Color::Green));
        let config = cb.build();

        TermLogger::init(
            self.args.log_level(),
            config,
            TerminalMode::Mixed,
            ColorChoice::Always
        ).unwrap()
    }
}

fn measure<F, Res>(proc: F) -> (Res, std::time::Duration)
where F: FnOnce() -> Res {
    let start = std::time::Instant::now();
    let res = proc();
    let time = start.elapsed();
    (res, time)
}
