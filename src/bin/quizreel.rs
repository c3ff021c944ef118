use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use quizreel::{
    CaptionSegment, NarrationRef, QuestionPayload, QuizRenderer, RenderBackend as _, RenderConfig,
    RenderOpts, ScriptInput, TemplateCatalog, Timeline,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quizreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the quiz video as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the planned timeline as JSON without encoding.
    Plan(PlanArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Generate a narration script from a script input JSON.
    Script(ScriptArgs),
    /// Estimate caption timing for a narration script.
    Captions(CaptionsArgs),
    /// List the built-in templates.
    Templates,
}

#[derive(Args, Debug)]
struct QuizArgs {
    /// Caption segments JSON array.
    #[arg(long)]
    captions: PathBuf,

    /// Question payload JSON.
    #[arg(long)]
    question: PathBuf,

    /// Template id (unknown ids use template 1).
    #[arg(long, default_value_t = 1)]
    template: u32,

    #[arg(long, default_value = "")]
    exam: String,

    #[arg(long, default_value = "")]
    course: String,

    /// Overlay the exam/course header.
    #[arg(long)]
    header: bool,

    /// Render config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct NarrationArgs {
    /// Narration audio file (decoded with ffmpeg to measure it).
    #[arg(long, required_unless_present = "audio_duration")]
    audio: Option<PathBuf>,

    /// Narration length in seconds, instead of decoding `--audio`.
    #[arg(long, conflicts_with = "audio")]
    audio_duration: Option<f64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    quiz: QuizArgs,

    /// Narration audio file.
    #[arg(long)]
    audio: PathBuf,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    quiz: QuizArgs,

    #[command(flatten)]
    narration: NarrationArgs,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    quiz: QuizArgs,

    #[command(flatten)]
    narration: NarrationArgs,

    /// Timeline time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ScriptArgs {
    /// Script input JSON (exam_name, course_name, question_statement, question_type, options,
    /// answer, solution).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Narration style id, 1 to 5.
    #[arg(long, default_value_t = quizreel::script::DEFAULT_STYLE_ID)]
    style: u32,
}

#[derive(Args, Debug)]
struct CaptionsArgs {
    /// Plain-text narration script.
    #[arg(long)]
    script: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Script(args) => cmd_script(args),
        Command::Captions(args) => cmd_captions(args),
        Command::Templates => cmd_templates(),
    }
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn load_config(path: Option<&Path>) -> anyhow::Result<RenderConfig> {
    let cfg = match path {
        Some(p) => RenderConfig::from_path(p)
            .with_context(|| format!("load render config '{}'", p.display()))?,
        None => RenderConfig::default(),
    };
    Ok(cfg.with_env())
}

fn load_inputs(quiz: &QuizArgs) -> anyhow::Result<(Vec<CaptionSegment>, QuestionPayload)> {
    let captions = quizreel::parse_captions(&read_text(&quiz.captions, "captions")?)
        .with_context(|| format!("parse captions '{}'", quiz.captions.display()))?;
    let payload = QuestionPayload::from_path(&quiz.question)
        .with_context(|| format!("parse question '{}'", quiz.question.display()))?;
    Ok((captions, payload))
}

fn make_renderer<'c>(
    catalog: &'c TemplateCatalog,
    quiz: &QuizArgs,
) -> anyhow::Result<QuizRenderer<'c>> {
    let cfg = load_config(quiz.config.as_deref())?;
    Ok(QuizRenderer::new(catalog, quiz.template, cfg)?.with_opts(RenderOpts {
        with_header: quiz.header,
    }))
}

fn plan_timeline(
    renderer: &QuizRenderer<'_>,
    quiz: &QuizArgs,
    narration: &NarrationArgs,
) -> anyhow::Result<Timeline> {
    let (captions, payload) = load_inputs(quiz)?;
    let timeline = match (&narration.audio, narration.audio_duration) {
        (Some(audio), _) => {
            renderer
                .plan_with_audio(audio, &captions, &payload, &quiz.exam, &quiz.course)?
                .0
        }
        (None, Some(secs)) => renderer.plan(
            &captions,
            &payload,
            NarrationRef {
                path: PathBuf::new(),
                duration_secs: secs,
            },
            &quiz.exam,
            &quiz.course,
        )?,
        (None, None) => anyhow::bail!("either --audio or --audio-duration is required"),
    };
    Ok(timeline)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let catalog = TemplateCatalog::builtin();
    let renderer = make_renderer(&catalog, &args.quiz)?;
    let (captions, payload) = load_inputs(&args.quiz)?;

    let out = renderer.render_video(
        &args.out,
        &args.audio,
        &captions,
        &payload,
        &args.quiz.exam,
        &args.quiz.course,
    )?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let catalog = TemplateCatalog::builtin();
    let renderer = make_renderer(&catalog, &args.quiz)?;
    let timeline = plan_timeline(&renderer, &args.quiz, &args.narration)?;
    println!("{}", serde_json::to_string_pretty(&timeline)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let catalog = TemplateCatalog::builtin();
    let renderer = make_renderer(&catalog, &args.quiz)?;
    let timeline = plan_timeline(&renderer, &args.quiz, &args.narration)?;

    let mut backend = renderer.rasterizer()?;
    let frame = backend.render_frame(&timeline, args.time)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let input: ScriptInput = serde_json::from_str(&read_text(&args.in_path, "script input")?)
        .with_context(|| format!("parse script input '{}'", args.in_path.display()))?;
    println!("{}", quizreel::generate_script(&input, args.style)?);
    Ok(())
}

fn cmd_captions(args: CaptionsArgs) -> anyhow::Result<()> {
    let script = read_text(&args.script, "script")?;
    let track = quizreel::generate_captions(script.trim_end_matches('\n'));
    println!("{}", serde_json::to_string_pretty(&track)?);
    Ok(())
}

fn cmd_templates() -> anyhow::Result<()> {
    let catalog = TemplateCatalog::builtin();
    println!("{}", serde_json::to_string_pretty(&catalog.iter().collect::<Vec<_>>())?);
    Ok(())
}
