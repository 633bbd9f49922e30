//! Display-only catalog of the backend systems the agent is presented as
//! being connected to. There is no transport here: the servers are static
//! records for dashboard rendering, and the tool definitions are declared
//! to the model on every chat request.

use crate::llm::ToolDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpServerKind {
    Etl,
    Monitoring,
    Database,
    Other,
}

impl McpServerKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Etl => "ETL",
            Self::Monitoring => "Monitoring",
            Self::Database => "Database",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpServerStatus {
    Connected,
    Disconnected,
    Error,
}

impl McpServerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connected => "CONNECTED",
            Self::Disconnected => "DISCONNECTED",
            Self::Error => "ERROR",
        }
    }
}

/// Static server record, never mutated after construction.
#[derive(Debug, Clone)]
pub struct McpServer {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: McpServerKind,
    pub status: McpServerStatus,
    pub url: &'static str,
    pub capabilities: &'static [&'static str],
}

pub struct McpCatalog {
    servers: Vec<McpServer>,
}

impl Default for McpCatalog {
    fn default() -> Self {
        Self {
            servers: vec![
                McpServer {
                    id: "mcp-abinitio-01",
                    name: "Ab Initio ETL Core",
                    kind: McpServerKind::Etl,
                    status: McpServerStatus::Connected,
                    url: "mcp://etl-controller:8080",
                    capabilities: &[
                        "job_status",
                        "trigger_graph",
                        "data_lineage",
                        "error_log_retrieval",
                    ],
                },
                McpServer {
                    id: "mcp-pagerduty-01",
                    name: "PagerDuty Ops",
                    kind: McpServerKind::Monitoring,
                    status: McpServerStatus::Connected,
                    url: "mcp://pd-gateway:3000",
                    capabilities: &[
                        "list_incidents",
                        "acknowledge_incident",
                        "resolve_incident",
                        "on_call_users",
                    ],
                },
            ],
        }
    }
}

impl McpCatalog {
    pub fn servers(&self) -> &[McpServer] {
        &self.servers
    }

    /// The two functions declared to the model. Nothing else is ever
    /// advertised, and nothing is executed on this side.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: "list_incidents".to_string(),
                description: "List active high-urgency incidents from PagerDuty MCP.".to_string(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "urgency": {
                            "type": "string",
                            "description": "Filter by urgency (high/low)"
                        },
                        "limit": {
                            "type": "number",
                            "description": "Max number of incidents to return"
                        }
                    }
                }),
            },
            ToolDefinition {
                name: "get_etl_job_status".to_string(),
                description:
                    "Get the status and failure logs of a specific Ab Initio ETL job graph."
                        .to_string(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "jobName": {
                            "type": "string",
                            "description": "The name of the ETL job/graph (.mp)"
                        }
                    },
                    "required": ["jobName"]
                }),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_carries_both_servers() {
        let catalog = McpCatalog::default();
        let names: Vec<_> = catalog.servers().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Ab Initio ETL Core", "PagerDuty Ops"]);
        assert!(catalog
            .servers()
            .iter()
            .all(|s| s.status == McpServerStatus::Connected));
    }

    #[test]
    fn exactly_two_tools_are_declared() {
        let tools = McpCatalog::default().tool_definitions();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "list_incidents");
        assert_eq!(tools[1].name, "get_etl_job_status");
        assert_eq!(tools[1].parameters["required"][0], "jobName");
    }
}
