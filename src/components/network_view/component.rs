use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};

use super::adapter::NetworkView;
use super::canvas::{CanvasEngine, DomLookup};
use super::config::ViewConfig;
use super::types::{Bounds, GraphData};

/// Area new nodes without coordinates are scattered over.
const SCATTER_WIDTH: f64 = 600.0;
const SCATTER_HEIGHT: f64 = 300.0;

/// Mounts a [`NetworkView`] on its own container and reloads it whenever
/// `data` changes. Clicking a node selects it.
#[component]
pub fn NetworkPanel(
	#[prop(into)] container_id: String,
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] config: Option<ViewConfig>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let network: Rc<RefCell<Option<NetworkView<CanvasEngine>>>> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();
	let id = container_id.clone();

	Effect::new(move |_| {
		if container_ref.get().is_none() {
			return;
		}
		let graph = data.get();
		let mut slot = network.borrow_mut();
		if slot.is_none() {
			match NetworkView::<CanvasEngine>::mount(&DomLookup, &id, config.clone()) {
				Ok(mut view) => {
					let panel = Rc::downgrade(&network);
					view.on_node_click(move |node| {
						let Some(panel) = panel.upgrade() else {
							return;
						};
						// busy only while a reload is running
						let Ok(mut slot) = panel.try_borrow_mut() else {
							return;
						};
						if let Some(view) = slot.as_mut() {
							debug!("selecting clicked node {node}");
							let _ = view.select_node(node);
						}
					});
					*slot = Some(view);
				}
				Err(e) => {
					error!("cannot mount network view: {e}");
					return;
				}
			}
		}
		if let Some(view) = slot.as_mut() {
			view.clear();
			view.load(&graph, Bounds::centered(SCATTER_WIDTH, SCATTER_HEIGHT));
			view.draw();
		}
	});

	let style = if fullscreen {
		"position: fixed; inset: 0;"
	} else {
		"width: 100%; height: 100%;"
	};

	view! { <div node_ref=container_ref id=container_id class="network-view" style=style /> }
}
