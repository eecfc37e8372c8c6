//! Full turns through the loop with the built-in tools and a scripted model.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use toolloop_core::{
    AgentBuilder, AgentError, GenerationOptions, LlmProvider, Message, ModelTurn, Result, Role,
    Session, ToolCall, ToolSchema,
};
use toolloop_tools::{DEFAULT_SYSTEM_PROMPT, SeededNumberTable, builtin_registry};

type Step = Box<dyn Fn(&[Message]) -> ModelTurn + Send + Sync>;

/// Plays one step per model call; each step may inspect the history
struct ScriptedModel {
    steps: Mutex<VecDeque<Step>>,
    advertised: Mutex<Vec<Vec<String>>>,
}

impl ScriptedModel {
    fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            advertised: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LlmProvider for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        history: &[Message],
        tools: &[ToolSchema],
        _options: &GenerationOptions,
    ) -> Result<ModelTurn> {
        self.advertised
            .lock()
            .unwrap()
            .push(tools.iter().map(|t| t.name.clone()).collect());
        let next = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AgentError::ModelUnavailable("no more steps".into()))?;
        Ok(next(history))
    }
}

fn step(f: impl Fn(&[Message]) -> ModelTurn + Send + Sync + 'static) -> Step {
    Box::new(f)
}

fn call(id: &str, name: &str, args: serde_json::Value) -> ToolCall {
    ToolCall::new(id, name, args)
}

/// Final answer quoting the latest tool output
fn answer_with_last_result(prefix: &'static str) -> Step {
    step(move |history| {
        let last = history.last().and_then(Message::tool_result).unwrap();
        ModelTurn::FinalAnswer(format!("{prefix}{}", last.content))
    })
}

fn session(model: Arc<ScriptedModel>) -> Session {
    let table = Arc::new(SeededNumberTable::from_pairs([(20, 64)]));
    let agent = AgentBuilder::new()
        .provider(model)
        .tools(builtin_registry(table).unwrap())
        .system_prompt(DEFAULT_SYSTEM_PROMPT)
        .build()
        .unwrap();
    Session::new(Arc::new(agent))
}

#[tokio::test]
async fn add_two_and_five() {
    let model = ScriptedModel::new(vec![
        step(|_| {
            ModelTurn::tool_calls(vec![call(
                "call_add",
                "calculator",
                json!({"operation": "add", "a": 2, "b": 5}),
            )])
        }),
        answer_with_last_result("2 + 5 = "),
    ]);
    let mut session = session(model.clone());

    let outcome = session.run_turn_detailed("add 2 and 5").await.unwrap();

    assert!(outcome.answer.contains('7'));
    assert_eq!(outcome.rounds, 1);

    let messages = outcome.conversation.messages();
    assert_eq!(messages[0].role(), Role::System);
    assert_eq!(messages[1].content(), "add 2 and 5");
    let result = messages[3].tool_result().unwrap();
    assert_eq!(result.correlation_id, "call_add");
    assert!(!result.is_error);
    assert_eq!(result.content, "7");

    // same tool set advertised on every call
    let advertised = model.advertised.lock().unwrap().clone();
    assert_eq!(advertised.len(), 2);
    assert_eq!(advertised[0], advertised[1]);
    assert_eq!(advertised[0].len(), 4);
}

#[tokio::test]
async fn unsupported_conversion_is_reported_as_data() {
    let model = ScriptedModel::new(vec![
        step(|_| {
            ModelTurn::tool_calls(vec![call(
                "call_conv",
                "unitConvert",
                json!({"from": "meter", "to": "celsius", "value": 5}),
            )])
        }),
        answer_with_last_result("Sorry: "),
    ]);
    let mut session = session(model);

    let outcome = session
        .run_turn_detailed("convert 5 meter to celsius")
        .await
        .unwrap();

    let result = outcome.conversation.last().unwrap().tool_result().unwrap();
    assert!(!result.is_error);
    assert_eq!(result.content, "Unsupported conversion: meter -> celsius");
    assert_eq!(
        outcome.answer,
        "Sorry: Unsupported conversion: meter -> celsius"
    );
}

#[tokio::test]
async fn chained_rounds_feed_results_forward() {
    let model = ScriptedModel::new(vec![
        step(|_| {
            ModelTurn::tool_calls(vec![call(
                "c1",
                "calculator",
                json!({"operation": "add", "a": 10, "b": 10}),
            )])
        }),
        step(|history| {
            let sum: f64 = history
                .last()
                .and_then(Message::tool_result)
                .unwrap()
                .content
                .parse()
                .unwrap();
            ModelTurn::tool_calls(vec![call("c2", "findNumberValue", json!({"number": sum}))])
        }),
        answer_with_last_result("The value is "),
    ]);
    let mut session = session(model);

    let outcome = session
        .run_turn_detailed("add 10 and 10 then find Number Value of the result")
        .await
        .unwrap();

    assert_eq!(outcome.rounds, 2);
    assert_eq!(outcome.answer, "The value is 64");
}

#[tokio::test]
async fn mixed_round_keeps_request_order_and_contains_errors() {
    let model = ScriptedModel::new(vec![
        step(|_| {
            ModelTurn::tool_calls(vec![
                call("t1", "textTransform", json!({"op": "slug", "text": "Hello, World!"})),
                call("t2", "calculator", json!({"operation": "divide", "a": 1, "b": 0})),
                call("t3", "weather", json!({"city": "Pune"})),
                call("t4", "textTransform", json!({"op": "title", "text": "x"})),
            ])
        }),
        step(|_| ModelTurn::FinalAnswer("done".into())),
    ]);
    let mut session = session(model);

    let outcome = session.run_turn_detailed("do things").await.unwrap();
    let results: Vec<_> = outcome
        .conversation
        .messages()
        .iter()
        .filter_map(Message::tool_result)
        .collect();

    let ids: Vec<_> = results.iter().map(|r| r.correlation_id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2", "t3", "t4"]);

    assert_eq!(results[0].content, "hello-world");
    assert!(!results[0].is_error);
    assert!(results[1].is_error);
    assert!(results[1].content.contains("division by zero"));
    assert!(results[2].is_error);
    assert_eq!(results[2].content, "ToolNotFound");
    assert!(results[3].is_error);
    assert!(results[3].content.starts_with("ToolArgumentInvalid"));
}

#[tokio::test]
async fn model_failure_ends_turn_but_not_session() {
    let model = ScriptedModel::new(vec![step(|_| ModelTurn::FinalAnswer("hello".into()))]);
    let mut session = session(model);

    assert_eq!(session.run_turn("hi").await.unwrap(), "hello");

    let err = session.run_turn("hi again").await.unwrap_err();
    assert!(matches!(err, AgentError::ModelUnavailable(_)));
    assert!(!err.user_message().is_empty());
}
