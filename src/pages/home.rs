use leptos::prelude::*;
use log::{info, warn};
use rand::Rng;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::network_view::color::choice;
use crate::components::network_view::{GraphData, GraphLink, GraphNode, Label, NetworkPanel, NodeId};

/// Graph data embedded in the page as `<script id="graph-data" type="application/json">`.
fn load_graph_data() -> Option<GraphData> {
	let document = web_sys::window()?.document()?;
	let script: HtmlScriptElement = document.get_element_by_id("graph-data")?.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"loaded {} nodes, {} links from the page",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("failed to parse graph data: {}", e);
			None
		}
	}
}

/// Random haplotype tree: every node after the first links back to an
/// earlier one with a random weight.
fn generate_sample_data(n: usize) -> GraphData {
	let mut rng = rand::thread_rng();
	let ids: Vec<NodeId> = (0..n).map(|i| NodeId::new(format!("hap{i}"))).collect();

	let nodes = ids
		.iter()
		.map(|id| GraphNode {
			id: id.clone(),
			label: Some(Label::new(id.as_str())),
			x: None,
			y: None,
		})
		.collect();

	let links = (1..n)
		.filter_map(|i| {
			let target = choice(&mut rng, &ids[..i])?;
			Some(GraphLink {
				source: ids[i].clone(),
				target: target.clone(),
				label: None,
				weight: Some(rng.gen_range(1..=999) as f64),
			})
		})
		.collect();

	GraphData { nodes, links }
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph_data = load_graph_data().unwrap_or_else(|| generate_sample_data(12));
	let graph_signal = Signal::derive(move || graph_data.clone());

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<NetworkPanel container_id="network" data=graph_signal fullscreen=true />
				<div class="graph-overlay">
					<h1>"Haplotype Network"</h1>
					<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
