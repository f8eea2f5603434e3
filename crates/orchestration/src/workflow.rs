//! Mermaid rendering of an executed run.

use crate::request::StrategyKind;
use crate::step::Step;

/// Renders the executed steps as a Mermaid flowchart.
///
/// Concurrent runs fan out from the request and join before the response;
/// every other strategy is drawn as a chain in step order.
pub fn render(strategy: StrategyKind, steps: &[Step]) -> String {
    let mut diagram = String::from("flowchart TD\n");
    diagram.push_str("    request([Request])\n");

    for (index, step) in steps.iter().enumerate() {
        diagram.push_str(&format!(
            "    s{index}[\"{}<br/>{}\"]\n",
            escape(&step.agent_label),
            escape(&step.action)
        ));
    }
    diagram.push_str("    response([Response])\n");

    match strategy {
        StrategyKind::Concurrent => {
            for index in 0..steps.len() {
                diagram.push_str(&format!("    request --> s{index}\n"));
                diagram.push_str(&format!("    s{index} --> response\n"));
            }
        }
        _ => {
            let mut previous = "request".to_string();
            for index in 0..steps.len() {
                let node = format!("s{index}");
                diagram.push_str(&format!("    {previous} --> {node}\n"));
                previous = node;
            }
            diagram.push_str(&format!("    {previous} --> response\n"));
        }
    }

    diagram
}

fn escape(label: &str) -> String {
    label.replace('"', "#quot;")
}
