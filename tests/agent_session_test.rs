//! End-to-end agent session against mock search services
//!
//! Wires the tool surface, the tool call governor, and the token budget
//! governor together the way an agent loop would.

use reqwest::Client;
use scout_core::backends::{SourcegraphClient, SourcegraphContentFetcher, ZoektClient, ZoektContentFetcher};
use scout_core::error::NOT_FOUND_MESSAGE;
use scout_core::governor::{execution_channel, limit_reached_notice, resource_limits_notice};
use scout_core::{
    CodeSearchTools, ContentClient, FormattedResult, SearchClient, TokenBudgetGovernor,
    TokenUsage, ToolCallGovernor, ToolInvocation,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_client() -> Client {
    Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to create HTTP client")
}

fn sourcegraph_tools(endpoint: &str) -> CodeSearchTools {
    let search = SourcegraphClient::new(endpoint, Some("token".to_string()))
        .expect("valid endpoint")
        .with_http_client(http_client());
    let fetcher = SourcegraphContentFetcher::new(endpoint, Some("token".to_string()))
        .expect("valid endpoint")
        .with_http_client(http_client());
    CodeSearchTools::new(SearchClient::Sourcegraph(search), ContentClient::Sourcegraph(fetcher))
}

async fn mount_sourcegraph(server: &MockServer) {
    let matches = json!([{
        "type": "content",
        "repository": "github.com/acme/api",
        "path": "src/handlers.rs",
        "chunkMatches": [{
            "content": "pub async fn create_user() {",
            "contentStart": { "line": 41, "offset": 0, "column": 0 }
        }]
    }]);
    let body = format!(
        "event: progress\ndata: {{\"matchCount\":1}}\n\nevent: matches\ndata: {}\n\nevent: done\ndata: {{}}\n\n",
        matches
    );

    Mock::given(method("GET"))
        .and(path("/.api/search/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/.api/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": { "commit": { "file": {
                "content": "pub async fn create_user() {}\n",
                "totalLines": 1
            }}}}
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_governed_tool_session() {
    let server = MockServer::start().await;
    mount_sourcegraph(&server).await;

    let tools = sourcegraph_tools(&server.uri());
    let governor = ToolCallGovernor::new(2).expect("positive limit");
    let call_tool = governor.wrap(move |call: ToolInvocation| {
        let tools = tools.clone();
        async move { tools.invoke(call).await }
    });

    let search = call_tool(ToolInvocation::new("search").with_argument("query", "create_user")).await;
    let results: Vec<FormattedResult> =
        serde_json::from_str(search.content[0].as_text()).expect("search output is JSON");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].matches[0].line_number, 42);
    assert_eq!(
        results[0].url,
        "https://github.com/acme/api/-/blob/HEAD/src/handlers.rs"
    );

    let fetched = call_tool(
        ToolInvocation::new("fetch_content")
            .with_argument("repo", "github.com/acme/api")
            .with_argument("path", "src/handlers.rs"),
    )
    .await;
    assert_eq!(fetched.content[0].as_text(), "pub async fn create_user() {}\n");
    assert!(fetched.joined_text().contains("WARNING: This is your last tool call (2/2)"));

    let refused = call_tool(ToolInvocation::new("search").with_argument("query", "more")).await;
    assert_eq!(refused.joined_text(), limit_reached_notice(2));
    assert!(governor.limit_reached());

    // Only the two forwarded calls reached the search service
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_token_budget_over_agent_loop() {
    let server = MockServer::start().await;
    mount_sourcegraph(&server).await;
    let tools = sourcegraph_tools(&server.uri());

    let budget = TokenBudgetGovernor::new(10_000, 1_000).expect("valid budget");
    let (execution, driver) = execution_channel::<String>(8);

    let agent = tokio::spawn(async move {
        let mut usage = TokenUsage::default();
        for _ in 0..5 {
            let results = tools.search("create_user").await;
            usage.input_tokens += 2_000;
            usage.output_tokens += 100 * results.len() as u64;
            driver.step(Some(usage)).await.expect("governor listening");
        }
        driver
            .finish("final answer".to_string(), Some(usage))
            .await
            .expect("governor listening");
        driver
    });

    let output = budget.run_with_limit(execution).await.expect("run finishes");
    let mut driver = agent.await.expect("agent task");

    assert_eq!(output, "final answer");
    let warning = driver.try_control().expect("one warning injected");
    assert!(warning.content().starts_with("TOKEN LIMIT WARNING: You have used 10500 tokens"));
    assert!(warning.content().contains("out of a maximum 10000"));
    assert!(driver.try_control().is_none());
}

#[tokio::test]
async fn test_zoekt_tools_report_missing_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Result": { "Files": null, "RepoURLs": {} }
        })))
        .mount(&server)
        .await;

    let tools = CodeSearchTools::new(
        SearchClient::Zoekt(
            ZoektClient::new(server.uri()).expect("valid url").with_http_client(http_client()),
        ),
        ContentClient::Zoekt(
            ZoektContentFetcher::new(server.uri())
                .expect("valid url")
                .with_http_client(http_client()),
        ),
    );

    assert!(tools.search("anything").await.is_empty());
    assert_eq!(
        tools.fetch_content("github.com/acme/api", "missing.rs").await,
        NOT_FOUND_MESSAGE
    );
}

#[test]
fn test_system_prompt_notice() {
    let notice = resource_limits_notice(50, 190_000);
    assert!(notice.contains("TOOL CALL LIMIT REACHED"));
    assert!(notice.contains("TOKEN LIMIT WARNING"));
}
