use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use linkedin_designer::api::{ApiClient, AuthApi};
use linkedin_designer::auth::{
    self, check_design_access, LoginForm, LoginOutcome, LoginPage, NavState, PaymentMethod,
    RegisterPage, RegistrationForm, Screenshot,
};
use linkedin_designer::auth::register::RegisterOutcome;
use linkedin_designer::design::templates::{find_template_by_name, templates_for};
use linkedin_designer::editor::UiEvent;
use linkedin_designer::export::{self, ImageFormat};
use linkedin_designer::notify::{Modal, Notification, Notifier, Redirect};
use linkedin_designer::rendering::raster::RasterCanvas;
use linkedin_designer::rendering::text::FontFace;
use linkedin_designer::rendering::SurfaceSize;
use linkedin_designer::session::{FileStorage, StorageExt};
use linkedin_designer::{DesignerConfig, Editor, Mode, TextField, Theme};
use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linkedin-designer", version, about = "Design LinkedIn banners and posts from the terminal")]
struct Cli {
    /// Origin of the REST API
    #[arg(long, env = "LINKEDIN_API_BASE", global = true)]
    api_base: Option<String>,

    /// Client storage file (session token, user info, ...)
    #[arg(long, env = "LINKEDIN_STORAGE", global = true)]
    storage: Option<PathBuf>,

    /// Font file used to rasterize text
    #[arg(long, env = "LINKEDIN_FONT", global = true)]
    font: Option<PathBuf>,

    /// More logging (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the template presets of a mode
    Templates {
        #[arg(long, default_value = "cover")]
        mode: String,
    },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LINKEDIN_PASSWORD", hide_env_values = true)]
        password: String,
        /// Remember the email for the next login
        #[arg(long)]
        remember: bool,
    },
    /// Register a new account with a payment screenshot
    Register(RegisterArgs),
    /// Show who is logged in and their account status
    Status,
    /// Forget the stored session
    Logout,
    /// Render a design and export it
    Render(RenderArgs),
}

#[derive(Args)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "LINKEDIN_PASSWORD", hide_env_values = true)]
    password: String,
    /// Defaults to --password
    #[arg(long)]
    confirm_password: Option<String>,
    /// binance, easypaisa or nayapay
    #[arg(long)]
    payment: Option<String>,
    /// Image proving the payment
    #[arg(long)]
    screenshot: Option<PathBuf>,
    #[arg(long)]
    agree_terms: bool,
}

#[derive(Args)]
struct RenderArgs {
    /// cover (alias banner) or post
    #[arg(long, default_value = "cover")]
    mode: String,
    /// Template id or name
    #[arg(long)]
    template: Option<String>,
    /// Custom theme as "#start,#end"
    #[arg(long)]
    colors: Option<String>,
    #[arg(long)]
    headline: Option<String>,
    #[arg(long)]
    subtext: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    headline_size: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    subtext_size: Option<i64>,
    #[arg(long)]
    font_family: Option<String>,
    /// left, center or right
    #[arg(long)]
    align: Option<String>,
    /// Position pad presses in order (up, down, left, right, reset)
    #[arg(long, value_delimiter = ',')]
    nudge: Vec<String>,
    /// png or jpeg
    #[arg(long, default_value = "png")]
    format: String,
    /// Output directory
    #[arg(long, short)]
    out: Option<PathBuf>,
    /// Do not ask the API for designer access
    #[arg(long)]
    skip_auth: bool,
    /// Print the SHA-256 of the rendered pixels
    #[arg(long)]
    digest: bool,
}

/// Prints notifications to stderr the way the page shows them.
struct TerminalNotifier<W: Write = io::Stderr> {
    out: RefCell<W>,
}

impl TerminalNotifier {
    fn stderr() -> Self {
        Self::to_writer(io::stderr())
    }
}

impl<W: Write> TerminalNotifier<W> {
    fn to_writer(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    fn line(&self, text: impl std::fmt::Display) {
        // A closed stderr is not worth failing the command over.
        let _ = writeln!(self.out.borrow_mut(), "{}", text);
    }
}

impl<W: Write> Notifier for TerminalNotifier<W> {
    fn notify(&self, n: &Notification) {
        self.line(n);
    }

    fn show_modal(&self, modal: Modal) {
        match modal {
            Modal::PendingApproval => self.line(
                "Your account is awaiting admin approval. You will be able to log in once it is verified.",
            ),
            Modal::RegistrationSuccess => self.line(
                "Registration received! Your payment is being verified; you can log in after approval.",
            ),
        }
    }

    fn redirect(&self, r: Redirect) {
        self.line(format_args!("-> {} (after {} ms)", r.to.path(), r.after_ms));
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<DesignerConfig> {
    let mut config = DesignerConfig::default();
    if let Some(base) = &cli.api_base {
        config.api_base = base.clone();
    }
    if let Some(storage) = &cli.storage {
        config.storage_path = storage.clone();
    }
    config.font_path = cli.font.clone();
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(&cli)?;
    let notifier = TerminalNotifier::stderr();

    match &cli.command {
        Command::Templates { mode } => {
            let mode: Mode = mode.parse()?;
            for t in templates_for(mode) {
                println!(
                    "{:>2}  {:<14} {} -> {}",
                    t.id, t.name, t.gradient[0], t.gradient[1]
                );
            }
        }
        Command::Login {
            email,
            password,
            remember,
        } => {
            let api = ApiClient::from_config(&config)?;
            let mut storage = FileStorage::open(&config.storage_path)?;
            let mut page = LoginPage::new(&api, &mut storage);
            let landing = page.on_load();
            landing.effects.deliver(&notifier);
            if landing.effects.redirect.is_some() {
                return Ok(());
            }
            let form = LoginForm {
                email: email.clone(),
                password: password.clone(),
                remember_me: *remember,
            };
            let result = page.submit(&form);
            result.effects.deliver(&notifier);
            if result.outcome != LoginOutcome::Approved {
                bail!("login did not complete ({:?})", result.outcome);
            }
        }
        Command::Register(args) => {
            let api = ApiClient::from_config(&config)?;
            let mut storage = FileStorage::open(&config.storage_path)?;
            let form = registration_form(args)?;
            let result = RegisterPage::new(&api, &mut storage).submit(&form);
            result.effects.deliver(&notifier);
            if result.outcome != RegisterOutcome::Submitted {
                bail!("registration did not complete ({:?})", result.outcome);
            }
        }
        Command::Status => {
            let storage = FileStorage::open(&config.storage_path)?;
            match auth::nav_state(&storage) {
                NavState::Anonymous => println!("Not logged in"),
                NavState::LoggedIn { name } => {
                    println!("Logged in as {}", name);
                    if let Some(token) = storage.token() {
                        let api = ApiClient::from_config(&config)?;
                        let status = api.auth_status(&token)?;
                        let state = status
                            .user
                            .and_then(|u| u.status)
                            .unwrap_or_else(|| "unknown".to_string());
                        println!("Account status: {}", state);
                    }
                }
            }
            if let Some(pending) = storage.pending_registration() {
                println!(
                    "Pending registration for {} since {}",
                    pending.email, pending.registered_at
                );
            }
        }
        Command::Logout => {
            let mut storage = FileStorage::open(&config.storage_path)?;
            auth::logout(&mut storage).deliver(&notifier);
        }
        Command::Render(args) => render(&config, args, &notifier)?,
    }
    Ok(())
}

fn registration_form(args: &RegisterArgs) -> anyhow::Result<RegistrationForm> {
    let payment_method = args
        .payment
        .as_deref()
        .map(str::parse::<PaymentMethod>)
        .transpose()?;
    let screenshot = match &args.screenshot {
        Some(path) => Some(Screenshot::from_path(path)?),
        None => None,
    };
    if let Some(shot) = &screenshot {
        log::info!("{}", shot.summary());
    }
    Ok(RegistrationForm {
        name: args.name.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        confirm_password: args
            .confirm_password
            .clone()
            .unwrap_or_else(|| args.password.clone()),
        payment_method,
        screenshot,
        agree_terms: args.agree_terms,
    })
}

fn render(
    config: &DesignerConfig,
    args: &RenderArgs,
    notifier: &TerminalNotifier,
) -> anyhow::Result<()> {
    if !args.skip_auth {
        let api = ApiClient::from_config(config)?;
        let mut storage = FileStorage::open(&config.storage_path)?;
        let gate = check_design_access(&api, &mut storage);
        gate.effects.deliver(notifier);
        if !gate.is_approved() {
            bail!("designer access denied ({:?})", gate.decision);
        }
    }

    let mode: Mode = args.mode.parse()?;
    let format: ImageFormat = args.format.parse()?;
    let font = config
        .font_path
        .as_deref()
        .map(FontFace::load)
        .transpose()
        .context("loading font")?;

    let canvas = RasterCanvas::new(SurfaceSize::for_mode(Mode::Banner), font)?;
    let mut editor = Editor::new(canvas)?;
    editor.dispatch(UiEvent::ModeButton(mode))?;
    if let Some(t) = &args.template {
        let id = match t.parse::<u32>() {
            Ok(id) => id,
            Err(_) => find_template_by_name(mode, t)
                .map(|t| t.id)
                .with_context(|| format!("no template named {:?} for {}", t, mode))?,
        };
        editor.dispatch(UiEvent::TemplateClicked(id))?;
    }
    if let Some(colors) = &args.colors {
        editor.dispatch(UiEvent::ThemeButton(Theme::parse_pair(colors)?))?;
    }
    if let Some(text) = &args.headline {
        editor.dispatch(UiEvent::TextInput(TextField::Headline, text.clone()))?;
    }
    if let Some(text) = &args.subtext {
        editor.dispatch(UiEvent::TextInput(TextField::Subtext, text.clone()))?;
    }
    if let Some(px) = args.headline_size {
        editor.dispatch(UiEvent::FontSizeSlider(TextField::Headline, px))?;
    }
    if let Some(px) = args.subtext_size {
        editor.dispatch(UiEvent::FontSizeSlider(TextField::Subtext, px))?;
    }
    if let Some(family) = &args.font_family {
        editor.dispatch(UiEvent::FontFamilyChanged(family.clone()))?;
    }
    if let Some(align) = &args.align {
        editor.dispatch(UiEvent::AlignButton(align.parse()?))?;
    }
    for press in &args.nudge {
        editor.dispatch(UiEvent::PositionButton(press.parse()?))?;
    }
    log::info!(
        "rendered {} ({}) in {} paints",
        mode,
        editor.dimensions_label(),
        editor.render_count()
    );

    let frame = editor.canvas().frame();
    if args.digest {
        println!("{}", frame.digest());
    }
    let dir = args.out.as_deref().unwrap_or(&config.output_dir);
    let (path, note) = export::save(&frame, format, mode, dir)?;
    notifier.notify(&note);
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkedin_designer::notify::{Effects, Page};

    fn printed(effects: &Effects) -> String {
        let notifier = TerminalNotifier::to_writer(Vec::new());
        effects.deliver(&notifier);
        String::from_utf8(notifier.out.into_inner()).unwrap()
    }

    #[test]
    fn each_notification_prints_once() {
        let effects = Effects::none()
            .notify(Notification::success("Logged out successfully"))
            .redirect(Page::Home, 1000);
        let out = printed(&effects);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2, "{:?}", lines);
        assert_eq!(out.matches("Logged out successfully").count(), 1);
        assert!(lines[1].starts_with("-> "));
    }

    #[test]
    fn modal_is_one_line() {
        let out = printed(&Effects::none().modal(Modal::PendingApproval));
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("awaiting admin approval"));
    }
}
