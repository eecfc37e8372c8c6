//! CLI argument definitions

use clap::Parser;

use toolloop_core::reasoning::DEFAULT_MAX_ROUNDS;
use toolloop_tools::ToolSet;

/// CLI arguments for toolloop
#[derive(Parser, Debug)]
#[command(name = "toolloop")]
#[command(version, about = "Chat with a model that can call local tools")]
#[command(long_about = r#"
toolloop sends each request to an OpenAI-compatible chat model together with
the available tools, runs whatever tools the model asks for and hands the
results back until the model answers.

Environment:
  OPENAI_API_KEY    required
  OPENAI_BASE_URL   defaults to https://api.openai.com/v1
  OPENAI_MODEL      defaults to gpt-4o
  RUST_LOG          log filter, defaults to info

Example:
  toolloop
  toolloop --tools text --prompt 'slug "Hello, World!"'
  toolloop --prompt "add 2 and 5" --prompt "convert 3 meter to foot"
"#)]
pub struct Cli {
    /// Model name, overrides OPENAI_MODEL
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Upper bound on tool rounds per request
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ROUNDS)]
    pub max_rounds: usize,

    /// Tools exposed to the model: all, calculator or text
    #[arg(short, long, value_name = "SET", default_value = "all")]
    pub tools: ToolSet,

    /// Run this request and exit (can be specified multiple times)
    #[arg(short, long, value_name = "TEXT")]
    pub prompt: Vec<String>,
}
