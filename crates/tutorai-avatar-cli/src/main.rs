//! TutorAI Avatar CLI - talk to avatar personas from the terminal
//!
//! Thin driver over the `tutorai-avatar` pipeline. Replies go to stdout,
//! logs go to stderr.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use config::Config;
use tutorai_avatar::domain::compose_prompt;
use tutorai_avatar::domain::services::animation_catalog;
use tutorai_avatar::{
    AnimationCategory, AvatarPipeline, GeminiProvider, Gender, GestureChannel, GlbAnimation, Persona,
    PersonaKey, ResponseEnvelope,
};

#[derive(Parser)]
#[command(name = "tutorai-avatar")]
#[command(about = "TutorAI Avatar CLI - persona replies with animation directives", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the Gemini API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Ask a persona a question
    Ask {
        /// The question
        text: String,
        /// Persona (scholar, mentor, coach, innovator, default)
        #[arg(short, long)]
        persona: Option<String>,
        /// Show the reply as a parsed envelope instead of raw text
        #[arg(short, long)]
        envelope: bool,
    },

    /// Feed a raw payload (JSON or plain text) to the generic entry point
    Run {
        /// Payload: a string, {"messages": [...]}, {"content": ...} or a message list
        payload: String,
        /// Request streaming (accepted, complete text is still returned)
        #[arg(long)]
        stream: bool,
    },

    /// Print the composed prompt without calling the API
    Prompt {
        /// The question
        text: String,
        /// Persona to compose for
        #[arg(short, long)]
        persona: Option<String>,
    },

    /// List personas and their animation rigs
    Personas {
        /// Also list every canonical animation name
        #[arg(short, long)]
        animations: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set the Gemini model
    SetModel {
        /// Model name (e.g., "gemini-2.0-flash")
        model: String,
    },
    /// Set the persona used when none is given
    SetPersona {
        /// Persona key
        persona: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { key } => cmd_login(key),
        Commands::Ask { text, persona, envelope } => cmd_ask(text, persona, envelope).await,
        Commands::Run { payload, stream } => cmd_run(payload, stream).await,
        Commands::Prompt { text, persona } => cmd_prompt(text, persona),
        Commands::Personas { animations } => cmd_personas(animations),
        Commands::Config { action } => cmd_config(action),
    }
}

// ============================================
// Command Implementations
// ============================================

fn cmd_login(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("Gemini API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    if api_key.trim().is_empty() {
        bail!("API key cannot be empty");
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);
    Ok(())
}

/// Persona from the flag, else the configured default
fn persona_or_default(flag: Option<&str>, config: &Config) -> PersonaKey {
    match flag {
        Some(raw) => {
            let key = PersonaKey::resolve(raw);
            if key.as_str() != raw.trim().to_lowercase() {
                eprintln!("{} Unknown persona '{}', using default", "!".yellow(), raw);
            }
            key
        }
        None => config.default_persona,
    }
}

async fn cmd_ask(text: String, persona: Option<String>, envelope: bool) -> Result<()> {
    let config = Config::load()?;
    let persona = persona_or_default(persona.as_deref(), &config);
    let pipeline = build_pipeline(&config)?;
    tracing::debug!(persona = %persona, "Asking persona");

    pipeline.on_startup().await;
    let messages = vec![json!({"role": "user", "content": text})];
    let body = json!({"avatar_type": persona.as_str()});
    let reply = pipeline.pipe(&text, pipeline.model_id(), &messages, &body).await;
    pipeline.on_shutdown().await;

    if envelope {
        print_envelope(&reply);
    } else {
        println!("{}", reply);
    }
    Ok(())
}

async fn cmd_run(payload: String, stream: bool) -> Result<()> {
    let config = Config::load()?;
    let pipeline = build_pipeline(&config)?;
    let input = parse_payload(payload);

    pipeline.on_startup().await;
    let reply = pipeline.run(&input, stream).await;
    pipeline.on_shutdown().await;

    println!("{}", reply);
    Ok(())
}

fn build_pipeline(config: &Config) -> Result<AvatarPipeline<GeminiProvider>> {
    let pipeline_config = config.pipeline_config()?;
    tracing::debug!(config = ?pipeline_config, "Pipeline configured");
    Ok(AvatarPipeline::from_config(pipeline_config)?)
}

/// Anything that is not JSON is taken as a plain utterance
fn parse_payload(payload: String) -> Value {
    match serde_json::from_str::<Value>(&payload) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!("Payload is not JSON ({}), sending it as text", err);
            Value::String(payload)
        }
    }
}

fn cmd_prompt(text: String, persona: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let persona = persona_or_default(persona.as_deref(), &config);

    // Output the prompt to stdout (clean for piping)
    println!("{}", compose_prompt(&text, persona));
    Ok(())
}

fn cmd_personas(animations: bool) -> Result<()> {
    println!("{}", "Personas:".bold());
    for persona in Persona::all() {
        println!(
            "  {} {} [{}] {}",
            persona.key.as_str().cyan().bold(),
            persona.gender.to_string().dimmed(),
            persona.prefix(),
            truncate_string(persona.instruction, 60).dimmed()
        );
    }

    if animations {
        for gender in [Gender::Male, Gender::Female] {
            println!("\n{}", format!("{} rig:", gender.label()).bold());
            for category in AnimationCategory::ALL {
                let names = animation_catalog::canonical_names(category, gender);
                println!("  {} ({})", category.as_str().cyan(), names.len());
                for name in names {
                    println!("    {}", name);
                }
            }
        }
    }

    Ok(())
}

fn print_envelope(reply: &str) {
    let Some(envelope) = ResponseEnvelope::from_model_text(reply) else {
        eprintln!("{}", "Reply is not a response envelope; raw text follows".yellow());
        println!("{}", reply);
        return;
    };

    println!("{}", envelope.response);

    for channel in GestureChannel::ALL {
        if let Some(code) = envelope.gesture(channel) {
            let label = u8::try_from(code)
                .ok()
                .and_then(|c| channel.label(c))
                .unwrap_or("unknown");
            eprintln!("  {} {} ({})", channel.field().dimmed(), code, label);
        }
    }

    let category = envelope
        .category()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    match &envelope.glb_animation {
        Some(GlbAnimation::Name(name)) => {
            eprintln!("  {} {} [{}]", "glb".dimmed(), name.cyan(), category);
        }
        Some(GlbAnimation::Sequence(steps)) => {
            for step in steps {
                let duration = step
                    .duration
                    .map(|d| format!(" {:.1}s", d))
                    .unwrap_or_default();
                eprintln!(
                    "  {} {} [{}]{}",
                    "glb".dimmed(),
                    step.name.cyan(),
                    step.category.as_deref().unwrap_or("-"),
                    duration
                );
            }
        }
        None => {}
    }
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}

fn cmd_config(action: Option<ConfigAction>) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        Some(ConfigAction::SetModel { model }) => {
            config.set_model(model.clone());
            config.save()?;
            println!("{} Model set to '{}'", "✓".green(), model);
        }
        Some(ConfigAction::SetPersona { persona }) => {
            let key: PersonaKey = persona
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            config.set_default_persona(key);
            config.save()?;
            println!("{} Default persona set to '{}'", "✓".green(), key);
        }
        None => {
            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!(
                "  API Key: {}",
                if config.api_key.is_some() { "Set".green() } else { "Not set".red() }
            );
            println!("  Model: {}", config.model.as_deref().unwrap_or("(default)"));
            println!("  Base URL: {}", config.base_url.as_deref().unwrap_or("(default)"));
            println!("  Default Persona: {}", config.default_persona.as_str().cyan());
            match config.pipeline_config() {
                Ok(effective) => println!("  Endpoint: {}", effective.endpoint()),
                Err(_) => println!("  Endpoint: {}", "unavailable (no API key)".red()),
            }
        }
    }

    Ok(())
}
