use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use example::{Transcript, parse_script, replay};
use stagetime_components::{
    TimeFieldArgs,
    time_field::{CountdownVariant, TimerVariant},
};
use stagetime_ui::EntryConfig;

#[derive(Parser)]
#[command(name = "stagetime-example")]
#[command(version, about = "Replays a keystroke script against a stagetime editor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    editor: Editor,
}

#[derive(Subcommand)]
enum Editor {
    /// 12-hour editor for the time a countdown runs to
    Countdown(ScriptArgs),
    /// Duration editor for a timer, in seconds
    Timer(ScriptArgs),
}

#[derive(Args)]
struct ScriptArgs {
    /// Snap minutes (and timer seconds) to the allowed lists
    #[arg(long)]
    snap: bool,
    /// Initial value ("6:30 PM" for countdowns, seconds or "h:mm:ss" for timers)
    #[arg(long)]
    value: Option<String>,
    /// Tracing filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn,stagetime_components=info")]
    log: String,
    /// Script tokens: up down left right tab shift-tab esc enter backspace
    /// blur frame click:N set:V, anything else is typed
    #[arg(required = true, num_args = 1..)]
    script: Vec<String>,
}

impl ScriptArgs {
    fn field_args(&self) -> TimeFieldArgs {
        TimeFieldArgs::default().snap_minutes(self.snap)
    }

    fn entry_config(&self) -> EntryConfig {
        EntryConfig::default().default_log_filter(self.log.clone())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let transcript = match &cli.editor {
        Editor::Countdown(args) => run::<CountdownVariant>(args)?,
        Editor::Timer(args) => run::<TimerVariant>(args)?,
    };

    for value in &transcript.emitted {
        println!("emit {value}");
    }
    println!("display {}", transcript.display);
    Ok(())
}

fn run<V: example::HostValue>(args: &ScriptArgs) -> Result<Transcript> {
    let steps = parse_script(args.script.iter().map(String::as_str))?;
    let transcript = replay::<V>(
        args.value.as_deref(),
        args.field_args(),
        &steps,
        args.entry_config(),
    )?;
    Ok(transcript)
}
