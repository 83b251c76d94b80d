use copy_code::{MemoryClipboard, Options, Page, ScopeBinding};
use dom::build::{code_block, doc, elem, text};
use dom::{Document, debug::outline};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const OUTLINE_CAP: usize = 200;

#[derive(Debug, Error)]
enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Invalid(#[from] copy_code::OptionsError),
}

fn load_options(path: &Path) -> Result<Options, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let options: Options = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    options.validate()?;
    Ok(options)
}

fn sample_document() -> Document {
    Document::from_node(&doc(vec![elem(
        "html",
        vec![],
        vec![
            elem("head", vec![], vec![elem("title", vec![], vec![text("Install")])]),
            elem(
                "body",
                vec![],
                vec![
                    elem("h1", vec![], vec![text("Getting started")]),
                    code_block("cargo install codecopy\n"),
                    elem("p", vec![], vec![text("Then run it with a config file:")]),
                    code_block("codecopy options.toml\n"),
                ],
            ),
        ],
    )]))
}

#[cfg(feature = "system-clipboard")]
fn run_clicks(page: &mut Page, buttons: &[dom::Id]) {
    page.set_clipboard(copy_code::SystemClipboard::new());
    for button in buttons {
        page.click(*button);
    }
}

#[cfg(not(feature = "system-clipboard"))]
fn run_clicks(page: &mut Page, buttons: &[dom::Id]) {
    for button in buttons {
        page.click(*button);
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match std::env::args_os().nth(1) {
        Some(path) => match load_options(Path::new(&path)) {
            Ok(options) => options,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };

    let clipboard = MemoryClipboard::new();
    let mut page = Page::new(sample_document(), clipboard.clone());
    let binding = ScopeBinding::mount(&mut page, None, options);
    let buttons: Vec<_> = binding
        .attachment()
        .map(|t| t.buttons().collect())
        .unwrap_or_default();
    log::info!("attached {} controls", buttons.len());

    run_clicks(&mut page, buttons.get(..1).unwrap_or_default());
    for line in outline(page.document(), page.document().root(), OUTLINE_CAP) {
        log::info!("{line}");
    }
    for write in clipboard.writes() {
        log::info!("clipboard <- {write:?}");
    }

    page.run_until_idle();
    log::info!("idle at {:?}", page.now());
    binding.unmount(&mut page);
    ExitCode::SUCCESS
}
