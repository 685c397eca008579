//! Analysis crew definition.
//!
//! Typed configuration for an external multi-agent orchestration engine:
//! which agents exist, what tools and model each uses, and which tasks run
//! in what order. Nothing here executes agents; the crate validates the
//! definition and serializes it as a manifest for the engine to consume.

pub mod defaults;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::types::DeskError;

/// Model used by every default agent and for crew chat.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_ITER: u32 = 25;

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// How the engine schedules tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Process {
    /// Tasks run in declaration order, each seeing earlier outputs.
    #[default]
    Sequential,
    /// A manager model delegates tasks to agents.
    Hierarchical,
}

/// External search/scrape tools an agent may be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tool {
    #[serde(rename = "SerperDevTool")]
    SerperDev,
    #[serde(rename = "SerplyNewsSearchTool")]
    SerplyNewsSearch,
    #[serde(rename = "ScrapeWebsiteTool")]
    ScrapeWebsite,
    #[serde(rename = "SerperScrapeWebsiteTool")]
    SerperScrapeWebsite,
}

impl Tool {
    /// Environment variable holding the credential this tool needs, if any.
    pub fn required_env(&self) -> Option<&'static str> {
        match self {
            Tool::SerperDev | Tool::SerperScrapeWebsite => Some("SERPER_API_KEY"),
            Tool::SerplyNewsSearch => Some("SERPLY_API_KEY"),
            Tool::ScrapeWebsite => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::SerperDev => write!(f, "SerperDevTool"),
            Tool::SerplyNewsSearch => write!(f, "SerplyNewsSearchTool"),
            Tool::ScrapeWebsite => write!(f, "ScrapeWebsiteTool"),
            Tool::SerperScrapeWebsite => write!(f, "SerperScrapeWebsiteTool"),
        }
    }
}

/// Model selection for an agent or for the crew itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSpec {
    /// Provider-prefixed model id, e.g. `openai/gpt-4o-mini`.
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl LlmSpec {
    pub fn new(model: &str, temperature: Option<f64>) -> Self {
        Self { model: model.to_string(), temperature }
    }

    /// Provider prefix of the model id (`openai` for `openai/gpt-4o-mini`).
    pub fn provider(&self) -> Option<&str> {
        self.model.split_once('/').map(|(p, _)| p)
    }

    /// Conventional API-key variable for the provider.
    pub fn required_env(&self) -> Option<String> {
        self.provider()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}_API_KEY", p.to_uppercase()))
    }
}

impl Default for LlmSpec {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, Some(DEFAULT_TEMPERATURE))
    }
}

fn default_max_iter() -> u32 {
    DEFAULT_MAX_ITER
}

fn default_true() -> bool {
    true
}

/// One agent in the crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub role: String,
    pub goal: String,
    #[serde(default)]
    pub backstory: String,
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub llm: LlmSpec,
    #[serde(default = "default_max_iter")]
    pub max_iter: u32,
    #[serde(default = "default_true")]
    pub inject_date: bool,
    #[serde(default)]
    pub allow_delegation: bool,
    #[serde(default)]
    pub reasoning: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rpm: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_execution_time_secs: Option<u64>,
}

/// One task, bound to the agent that performs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    /// Name of the agent that performs this task.
    pub agent: String,
    /// Earlier tasks whose output is fed in as context.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
    #[serde(default)]
    pub markdown: bool,
}

// ---------------------------------------------------------------------------
// Crew
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewSpec {
    pub name: String,
    #[serde(default)]
    pub process: Process,
    #[serde(default = "default_true")]
    pub verbose: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_llm: Option<LlmSpec>,
    /// Required when `process` is hierarchical.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_llm: Option<LlmSpec>,
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
}

impl CrewSpec {
    pub fn agent(&self, name: &str) -> Option<&AgentSpec> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn task(&self, name: &str) -> Option<&TaskSpec> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Check structural consistency before handing the crew to the engine.
    pub fn validate(&self) -> Result<(), DeskError> {
        if self.agents.is_empty() {
            return Err(DeskError::InvalidCrew("crew has no agents".into()));
        }
        if self.tasks.is_empty() {
            return Err(DeskError::InvalidCrew("crew has no tasks".into()));
        }

        let mut agent_names = HashSet::new();
        for agent in &self.agents {
            if !agent_names.insert(agent.name.as_str()) {
                return Err(DeskError::InvalidCrew(format!("duplicate agent '{}'", agent.name)));
            }
            if agent.max_iter == 0 {
                return Err(DeskError::InvalidCrew(format!(
                    "agent '{}' has max_iter 0",
                    agent.name
                )));
            }
            check_llm(&agent.llm, &agent.name)?;
        }

        if let Some(llm) = &self.chat_llm {
            check_llm(llm, "chat_llm")?;
        }
        match (&self.process, &self.manager_llm) {
            (Process::Hierarchical, None) => {
                return Err(DeskError::InvalidCrew(
                    "hierarchical process requires manager_llm".into(),
                ));
            }
            (_, Some(llm)) => check_llm(llm, "manager_llm")?,
            _ => {}
        }

        let mut seen_tasks: HashSet<&str> = HashSet::new();
        for task in &self.tasks {
            if seen_tasks.contains(task.name.as_str()) {
                return Err(DeskError::InvalidCrew(format!("duplicate task '{}'", task.name)));
            }
            if !agent_names.contains(task.agent.as_str()) {
                return Err(DeskError::InvalidCrew(format!(
                    "task '{}' references unknown agent '{}'",
                    task.name, task.agent
                )));
            }
            for dep in &task.context {
                if !seen_tasks.contains(dep.as_str()) {
                    return Err(DeskError::InvalidCrew(format!(
                        "task '{}' takes context from '{}', which is not an earlier task",
                        task.name, dep
                    )));
                }
            }
            seen_tasks.insert(task.name.as_str());
        }

        Ok(())
    }

    /// Every credential variable the engine will need for this crew.
    pub fn required_env(&self) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        for agent in &self.agents {
            vars.extend(agent.tools.iter().filter_map(Tool::required_env).map(String::from));
            vars.extend(agent.llm.required_env());
        }
        for llm in self.chat_llm.iter().chain(self.manager_llm.iter()) {
            vars.extend(llm.required_env());
        }
        vars
    }

    /// Validate and wrap the crew for serialization.
    pub fn manifest(&self) -> Result<CrewManifest<'_>, DeskError> {
        self.validate()?;
        Ok(CrewManifest {
            generated_at: Utc::now(),
            required_env: self.required_env(),
            crew: self,
        })
    }
}

fn check_llm(llm: &LlmSpec, owner: &str) -> Result<(), DeskError> {
    if llm.model.trim().is_empty() {
        return Err(DeskError::InvalidCrew(format!("{owner}: model is empty")));
    }
    if let Some(temp) = llm.temperature {
        if !(0.0..=2.0).contains(&temp) {
            return Err(DeskError::InvalidCrew(format!(
                "{owner}: temperature {temp} outside 0.0..=2.0"
            )));
        }
    }
    Ok(())
}

/// The document handed to the orchestration engine.
#[derive(Debug, Serialize)]
pub struct CrewManifest<'a> {
    pub generated_at: DateTime<Utc>,
    pub required_env: BTreeSet<String>,
    pub crew: &'a CrewSpec,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn crew() -> CrewSpec {
        defaults::financial_analysis_crew()
    }

    fn assert_invalid(crew: &CrewSpec, needle: &str) {
        match crew.validate() {
            Err(DeskError::InvalidCrew(msg)) => {
                assert!(msg.contains(needle), "'{msg}' should mention '{needle}'")
            }
            other => panic!("expected InvalidCrew, got {other:?}"),
        }
    }

    #[test]
    fn test_default_crew_is_valid() {
        assert!(crew().validate().is_ok());
    }

    #[test]
    fn test_empty_crew_rejected() {
        let mut c = crew();
        c.agents.clear();
        assert_invalid(&c, "no agents");

        let mut c = crew();
        c.tasks.clear();
        assert_invalid(&c, "no tasks");
    }

    #[test]
    fn test_duplicate_agent_rejected() {
        let mut c = crew();
        let dup = c.agents[0].clone();
        c.agents.push(dup);
        assert_invalid(&c, "duplicate agent");
    }

    #[test]
    fn test_duplicate_task_rejected() {
        let mut c = crew();
        let mut dup = c.tasks[0].clone();
        dup.context.clear();
        c.tasks.push(dup);
        assert_invalid(&c, "duplicate task");
    }

    #[test]
    fn test_unknown_agent_rejected() {
        let mut c = crew();
        c.tasks[1].agent = "ghost".into();
        assert_invalid(&c, "unknown agent 'ghost'");
    }

    #[test]
    fn test_forward_context_rejected() {
        let mut c = crew();
        c.tasks[0].context = vec![c.tasks[3].name.clone()];
        assert_invalid(&c, "not an earlier task");
    }

    #[test]
    fn test_temperature_range() {
        let mut c = crew();
        c.agents[0].llm.temperature = Some(2.5);
        assert_invalid(&c, "temperature");

        let mut c = crew();
        c.agents[0].llm.temperature = Some(2.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_zero_max_iter_rejected() {
        let mut c = crew();
        c.agents[2].max_iter = 0;
        assert_invalid(&c, "max_iter");
    }

    #[test]
    fn test_hierarchical_needs_manager() {
        let mut c = crew();
        c.process = Process::Hierarchical;
        assert_invalid(&c, "manager_llm");

        c.manager_llm = Some(LlmSpec::new("openai/gpt-4o", None));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_required_env() {
        let vars = crew().required_env();
        let vars: Vec<&str> = vars.iter().map(String::as_str).collect();
        assert_eq!(vars, vec!["OPENAI_API_KEY", "SERPER_API_KEY", "SERPLY_API_KEY"]);
    }

    #[test]
    fn test_llm_provider() {
        assert_eq!(LlmSpec::default().provider(), Some("openai"));
        assert_eq!(LlmSpec::new("local-model", None).provider(), None);
        assert_eq!(LlmSpec::new("local-model", None).required_env(), None);
    }

    #[test]
    fn test_manifest_serializes_tool_names() {
        let c = crew();
        let manifest = c.manifest().unwrap();
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["crew"]["process"], "sequential");
        assert_eq!(json["crew"]["agents"][0]["tools"][0], "SerperDevTool");
        assert_eq!(json["crew"]["agents"][0]["llm"]["temperature"], 0.7);
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_manifest_rejects_invalid() {
        let mut c = crew();
        c.agents.clear();
        assert!(c.manifest().is_err());
    }

    #[test]
    fn test_agent_defaults_from_toml() {
        let agent: AgentSpec = toml::from_str(
            r#"
            name = "scout"
            role = "Scout"
            goal = "Find things"
            tools = ["ScrapeWebsiteTool"]
            "#,
        )
        .unwrap();
        assert_eq!(agent.max_iter, 25);
        assert!(agent.inject_date);
        assert!(!agent.allow_delegation);
        assert_eq!(agent.llm, LlmSpec::default());
        assert_eq!(agent.tools, vec![Tool::ScrapeWebsite]);
    }
}
