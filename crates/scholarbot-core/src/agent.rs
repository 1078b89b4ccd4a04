//! Glue around the external agent executor.
//!
//! The agent itself (ReAct loop, chat model, search tool) is an external
//! collaborator. This module owns the three things that are ours: the system
//! prompt, the normalized message shapes at the boundary, and the extraction
//! of "the response" from whatever transcript the executor returns.

use scholarbot_types::chat::{ChatMessage, ChatRole};
use scholarbot_types::error::AgentError;

/// Reply used when the executor's transcript has no assistant content.
pub const FALLBACK_REPLY: &str = "No response generated.";

/// System prompt for the scholarship search assistant.
pub const SCHOLARSHIP_SYSTEM_PROMPT: &str = "\
You are ScholarSearch, an expert AI assistant specializing in finding and \
providing detailed information about scholarships for students. Your role is \
to help students find relevant scholarship opportunities with specific, \
actionable information.

IMPORTANT GUIDELINES:
1. ALWAYS provide specific scholarship names, amounts, and deadlines when available
2. Include real scholarship programs with actual dollar amounts
3. Provide application requirements and eligibility criteria
4. Include direct links to scholarship applications when possible
5. Organize information clearly with categories and bullet points
6. Be encouraging and supportive while providing practical advice

WHEN SEARCHING FOR SCHOLARSHIPS:
- Use the search tool to find current, up-to-date scholarship information
- Focus on scholarships that match the student's specific criteria
- Include both merit-based and need-based scholarships
- Mention application deadlines and requirements

RESPONSE FORMAT:
- Start with a brief summary of what you found
- List specific scholarships with: Name, Amount, Deadline, Requirements
- Include application tips and strategies";

/// The external agent-orchestration collaborator.
///
/// Takes an ordered, role-tagged transcript plus an optional conversation
/// thread id (for collaborator-side memory) and returns the full transcript
/// after the run, assistant turns included.
pub trait AgentExecutor: Send + Sync {
    fn invoke(
        &self,
        messages: Vec<ChatMessage>,
        thread_id: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, AgentError>> + Send;
}

/// Pick "the response" out of an executor transcript.
///
/// The last assistant message with non-empty content wins; a transcript
/// without one yields the literal [`FALLBACK_REPLY`].
pub fn extract_reply(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::Assistant && !m.content.is_empty())
        .map(|m| m.content.clone())
        .unwrap_or_else(|| FALLBACK_REPLY.to_string())
}

/// Thin front over an [`AgentExecutor`]: prepends the system prompt, passes
/// the thread id through, and extracts the final reply.
pub struct ScholarAgent<E> {
    executor: E,
    system_prompt: String,
}

impl<E: AgentExecutor> ScholarAgent<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            system_prompt: SCHOLARSHIP_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Override the default system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Run one query through the executor and return the extracted reply.
    pub async fn ask(&self, query: &str, thread_id: Option<&str>) -> Result<String, AgentError> {
        let messages = vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(query),
        ];
        let transcript = self.executor.invoke(messages, thread_id).await?;
        Ok(extract_reply(&transcript))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Executor that appends a scripted tail to the incoming transcript.
    struct ScriptedExecutor {
        tail: Vec<ChatMessage>,
        seen_thread_ids: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedExecutor {
        fn new(tail: Vec<ChatMessage>) -> Self {
            Self {
                tail,
                seen_thread_ids: Mutex::new(Vec::new()),
            }
        }
    }

    impl AgentExecutor for ScriptedExecutor {
        async fn invoke(
            &self,
            mut messages: Vec<ChatMessage>,
            thread_id: Option<&str>,
        ) -> Result<Vec<ChatMessage>, AgentError> {
            self.seen_thread_ids
                .lock()
                .unwrap()
                .push(thread_id.map(str::to_string));
            messages.extend(self.tail.iter().cloned());
            Ok(messages)
        }
    }

    // -------------------------------------------------------------------
    // extract_reply
    // -------------------------------------------------------------------

    #[test]
    fn test_extract_last_assistant_message() {
        let transcript = vec![
            ChatMessage::user("find scholarships"),
            ChatMessage::assistant("searching..."),
            ChatMessage::assistant("Here are three scholarships."),
        ];
        assert_eq!(extract_reply(&transcript), "Here are three scholarships.");
    }

    #[test]
    fn test_extract_skips_empty_assistant_content() {
        // Tool-call turns often surface as assistant messages with no text
        let transcript = vec![
            ChatMessage::assistant("Real answer."),
            ChatMessage::assistant(""),
        ];
        assert_eq!(extract_reply(&transcript), "Real answer.");
    }

    #[test]
    fn test_extract_ignores_user_and_system_turns() {
        let transcript = vec![
            ChatMessage::system("prompt"),
            ChatMessage::assistant("answer"),
            ChatMessage::user("thanks"),
        ];
        assert_eq!(extract_reply(&transcript), "answer");
    }

    #[test]
    fn test_extract_falls_back_without_assistant_content() {
        let transcript = vec![ChatMessage::user("hello"), ChatMessage::assistant("")];
        assert_eq!(extract_reply(&transcript), FALLBACK_REPLY);
    }

    #[test]
    fn test_extract_empty_transcript_falls_back() {
        assert_eq!(extract_reply(&[]), FALLBACK_REPLY);
    }

    // -------------------------------------------------------------------
    // ScholarAgent
    // -------------------------------------------------------------------

    #[tokio::test]
    async fn test_ask_prepends_system_prompt_and_extracts() {
        let executor = ScriptedExecutor::new(vec![ChatMessage::assistant("Found one.")]);
        let agent = ScholarAgent::new(executor);

        let reply = agent.ask("stem scholarships", None).await.unwrap();
        assert_eq!(reply, "Found one.");
    }

    #[tokio::test]
    async fn test_ask_passes_thread_id_through() {
        let executor = ScriptedExecutor::new(vec![ChatMessage::assistant("ok")]);
        let agent = ScholarAgent::new(executor);

        agent.ask("query", Some("thread-7")).await.unwrap();
        let seen = agent.executor.seen_thread_ids.lock().unwrap();
        assert_eq!(seen.as_slice(), &[Some("thread-7".to_string())]);
    }

    #[tokio::test]
    async fn test_ask_custom_system_prompt() {
        let executor = ScriptedExecutor::new(vec![]);
        let agent = ScholarAgent::new(executor).with_system_prompt("short prompt");

        // No assistant tail: fallback reply
        let reply = agent.ask("query", None).await.unwrap();
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_ask_propagates_executor_error() {
        struct FailingExecutor;
        impl AgentExecutor for FailingExecutor {
            async fn invoke(
                &self,
                _messages: Vec<ChatMessage>,
                _thread_id: Option<&str>,
            ) -> Result<Vec<ChatMessage>, AgentError> {
                Err(AgentError::Invocation("rate limited".to_string()))
            }
        }

        let agent = ScholarAgent::new(FailingExecutor);
        let result = agent.ask("query", None).await;
        assert!(result.is_err());
    }
}
