use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod tip;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Difficulty of the first game (beginner, intermediate or expert)
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Hide the solver help panel
    #[arg(long)]
    no_solver: bool,
}

impl Args {
    /// Arguments are passed in the location hash, e.g. `#-v&--seed=7`.
    fn from_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }

    fn game_props(&self) -> game::GameProps {
        let difficulty = match self.difficulty.as_deref() {
            Some(name) => hintsweeper_core::Difficulty::from_name(name).unwrap_or_else(|| {
                log::warn!("unknown difficulty {:?}, using the default", name);
                Default::default()
            }),
            None => Default::default(),
        };
        game::GameProps {
            seed: self.seed,
            difficulty,
            solver: !self.no_solver,
        }
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::from_hash(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game_props()).render();
}
