//! Built-in SecFlow scenario: an HTTPS request crossing an enterprise network.

use super::{NodeConfig, NodeKind, Step, Topology};

use NodeKind::*;

fn node(id: NodeKind, position: [f32; 3], color: &str, description: &str) -> NodeConfig {
    NodeConfig {
        id,
        position,
        color: color.to_string(),
        description: description.to_string(),
        label: None,
    }
}

/// Node table with spacing wide enough to keep labels apart.
pub fn topology() -> Topology {
    let mut client = node(Client, [-9.0, 0.0, 5.0], "#3b82f6", "Remote User Device");
    client.label = Some("Client (Nikhil)".to_string());

    Topology {
        nodes: vec![
            client,
            node(Internet, [-5.0, 0.0, 1.0], "#94a3b8", "Public Internet / ISP"),
            node(Firewall, [-1.0, 0.0, 0.0], "#ef4444", "Next-Gen Firewall (L3/L4)"),
            node(
                LoadBalancer,
                [3.0, 0.0, 0.0],
                "#f59e0b",
                "Load Balancer / Reverse Proxy",
            ),
            node(Waf, [3.0, 0.0, -3.5], "#8b5cf6", "Web App Firewall"),
            node(App, [7.0, 0.0, 0.0], "#10b981", "Application Server Cluster"),
            node(Auth, [7.0, 0.0, 3.5], "#ec4899", "IdP / Auth Service"),
            node(Database, [11.0, 0.0, 0.0], "#06b6d4", "Encrypted Database"),
            node(Siem, [1.0, 0.0, 5.0], "#6366f1", "SIEM & Logging"),
        ],
        // Bus/star hybrid: edge chain to the LB, App fans out, SIEM taps FW and App.
        connections: vec![
            (Client, Internet),
            (Internet, Firewall),
            (Firewall, LoadBalancer),
            (LoadBalancer, Waf),
            (LoadBalancer, App),
            (App, Auth),
            (App, Database),
            (App, Siem),
            (Firewall, Siem),
        ],
    }
}

struct StepDef {
    title: &'static str,
    description: &'static str,
    path: &'static [NodeKind],
    highlight: &'static [NodeKind],
    color: &'static str,
    label: &'static str,
}

const STEPS: &[StepDef] = &[
    StepDef {
        title: "1. DNS Resolution",
        description: "Client queries DNS resolver to find the IP address of dietiq.example.com. Returns 203.0.113.10.",
        path: &[Client, Internet, Client],
        highlight: &[Client, Internet],
        color: "#ffffff",
        label: "DNS Query",
    },
    StepDef {
        title: "2. TCP Handshake (SYN)",
        description: "Client initiates connection. Packet PASSES THROUGH Firewall (inspected, logged) to the Load Balancer.",
        path: &[Client, Internet, Firewall, LoadBalancer],
        highlight: &[Client, Firewall, LoadBalancer],
        color: "#fbbf24",
        label: "SYN",
    },
    StepDef {
        title: "2. TCP Handshake (SYN-ACK)",
        description: "Load Balancer acknowledges. Packet flows back THROUGH Firewall to Client.",
        path: &[LoadBalancer, Firewall, Internet, Client],
        highlight: &[LoadBalancer, Firewall, Client],
        color: "#fbbf24",
        label: "SYN-ACK",
    },
    StepDef {
        title: "2. TCP Handshake (ACK)",
        description: "Client confirms connection. TCP Session established.",
        path: &[Client, Internet, Firewall, LoadBalancer],
        highlight: &[Client, LoadBalancer],
        color: "#fbbf24",
        label: "ACK",
    },
    StepDef {
        title: "3. TLS 1.3 Handshake",
        description: "Encryption keys exchanged. ClientHello, ServerHello, Certificate, Finished. Channel is now secure.",
        path: &[LoadBalancer, Client, LoadBalancer],
        highlight: &[LoadBalancer, Client],
        color: "#10b981",
        label: "TLS Handshake",
    },
    StepDef {
        title: "4. HTTP Request (Encrypted)",
        description: "User sends GET /api/data. Firewall sees encrypted traffic on port 443 and allows it.",
        path: &[Client, Internet, Firewall, LoadBalancer],
        highlight: &[Client, Firewall, LoadBalancer],
        color: "#10b981",
        label: "HTTPS GET",
    },
    StepDef {
        title: "5. Decryption & WAF Inspection",
        description: "LB terminates TLS. Sends plaintext HTTP to WAF for inspection (SQLi, XSS check).",
        path: &[LoadBalancer, Waf, LoadBalancer],
        highlight: &[LoadBalancer, Waf],
        color: "#8b5cf6",
        label: "Plaintext HTTP",
    },
    StepDef {
        title: "6. App Processing & Routing",
        description: "Clean traffic routed to Application Server. Business logic executes.",
        path: &[LoadBalancer, App],
        highlight: &[LoadBalancer, App],
        color: "#ffffff",
        label: "Request",
    },
    StepDef {
        title: "7. Authentication (OIDC/SAML)",
        description: "App service validates User Session/JWT with Identity Provider.",
        path: &[App, Auth, App],
        highlight: &[App, Auth],
        color: "#ec4899",
        label: "Auth Token",
    },
    StepDef {
        title: "8. Authorization Check",
        description: "Policy Engine checks if User:Alice has ALLOW permission for Resource:Data.",
        // Same node twice: a pulse in place that still takes one segment of time.
        path: &[App, App],
        highlight: &[App],
        color: "#ec4899",
        label: "AuthZ",
    },
    StepDef {
        title: "9. Database Query",
        description: "App queries encrypted database for requested records.",
        path: &[App, Database, App],
        highlight: &[App, Database],
        color: "#06b6d4",
        label: "SQL Query",
    },
    StepDef {
        title: "10. Logging & SIEM",
        description: "Event logs are aggregated from FW, LB, WAF, and App to the SIEM dashboard.",
        path: &[App, Siem],
        highlight: &[App, Siem, Firewall, Waf],
        color: "#6366f1",
        label: "Syslog",
    },
    StepDef {
        title: "11. Response to Client",
        description: "Data returned: App -> LB (Re-encrypt) -> FW -> Client.",
        path: &[App, LoadBalancer, Firewall, Internet, Client],
        highlight: &[App, LoadBalancer, Firewall, Client],
        color: "#10b981",
        label: "HTTPS Response",
    },
];

/// The request lifecycle, DNS through response.
pub fn steps() -> Vec<Step> {
    STEPS
        .iter()
        .enumerate()
        .map(|(id, def)| Step {
            id,
            title: def.title.to_string(),
            description: def.description.to_string(),
            path: def.path.to_vec(),
            packet_visible: true,
            highlight: def.highlight.to_vec(),
            packet_color: Some(def.color.to_string()),
            packet_label: Some(def.label.to_string()),
        })
        .collect()
}
