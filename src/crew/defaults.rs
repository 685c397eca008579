//! The stock analysis and opportunity detection crew.
//!
//! Four agents (news, technicals, fundamentals, strategy) run four tasks
//! sequentially; the strategist's task consumes the three analyses.

use super::{AgentSpec, CrewSpec, LlmSpec, Process, TaskSpec, Tool, DEFAULT_MAX_ITER};

fn agent(name: &str, role: &str, goal: &str, backstory: &str, tools: Vec<Tool>) -> AgentSpec {
    AgentSpec {
        name: name.to_string(),
        role: role.to_string(),
        goal: goal.to_string(),
        backstory: backstory.to_string(),
        tools,
        llm: LlmSpec::default(),
        max_iter: DEFAULT_MAX_ITER,
        inject_date: true,
        allow_delegation: false,
        reasoning: false,
        max_rpm: None,
        max_execution_time_secs: None,
    }
}

fn task(name: &str, agent: &str, description: &str, expected: &str, context: &[&str]) -> TaskSpec {
    TaskSpec {
        name: name.to_string(),
        description: description.to_string(),
        expected_output: expected.to_string(),
        agent: agent.to_string(),
        context: context.iter().map(|s| s.to_string()).collect(),
        markdown: false,
    }
}

pub fn financial_analysis_crew() -> CrewSpec {
    let research_tools = vec![Tool::ScrapeWebsite, Tool::SerperDev, Tool::SerperScrapeWebsite];

    CrewSpec {
        name: "autonomous_stock_analysis_opportunity_detection".to_string(),
        process: Process::Sequential,
        verbose: true,
        chat_llm: Some(LlmSpec::new(super::DEFAULT_MODEL, None)),
        manager_llm: None,
        agents: vec![
            agent(
                "financial_news_analyst",
                "Financial News Analyst",
                "Track market-moving news for the watchlist and flag catalysts",
                "Former wire-service markets editor who separates signal from noise.",
                vec![Tool::SerperDev, Tool::SerplyNewsSearch],
            ),
            agent(
                "technical_analysis_specialist",
                "Technical Analysis Specialist",
                "Read price action, trend and momentum for each flagged symbol",
                "Chart-focused trader fluent in moving averages, RSI and volume profiles.",
                research_tools.clone(),
            ),
            agent(
                "fundamental_analysis_expert",
                "Fundamental Analysis Expert",
                "Assess valuation, growth and balance-sheet quality",
                "Equity research analyst who lives in filings and growth statements.",
                research_tools,
            ),
            agent(
                "investment_opportunity_strategist",
                "Investment Opportunity Strategist",
                "Combine news, technical and fundamental views into ranked opportunities",
                "Portfolio strategist who turns analyst notes into actionable ideas.",
                Vec::new(),
            ),
        ],
        tasks: vec![
            task(
                "monitor_financial_news",
                "financial_news_analyst",
                "Scan current financial news for the tracked symbols and summarise catalysts.",
                "A list of symbols with the news items and expected impact for each.",
                &[],
            ),
            task(
                "perform_technical_analysis",
                "technical_analysis_specialist",
                "Run a technical review of the symbols surfaced by the news scan.",
                "Per-symbol trend, support/resistance and momentum assessment.",
                &["monitor_financial_news"],
            ),
            task(
                "conduct_fundamental_analysis",
                "fundamental_analysis_expert",
                "Evaluate valuation and growth fundamentals for the same symbols.",
                "Per-symbol valuation, growth and financial-health summary.",
                &["monitor_financial_news"],
            ),
            task(
                "generate_investment_opportunities",
                "investment_opportunity_strategist",
                "Synthesise the three analyses into ranked investment opportunities.",
                "A ranked list of opportunities with thesis, risks and time horizon.",
                &[
                    "monitor_financial_news",
                    "perform_technical_analysis",
                    "conduct_fundamental_analysis",
                ],
            ),
        ],
    }
}
