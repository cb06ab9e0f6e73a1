use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::config::{DrawingProperties, GraphProperties};
use super::engine::{ContainerLookup, NodeClickHandler, RenderEngine};
use super::error::ViewError;
use super::render;
use super::state::{EdgeKey, NodeKey, SceneState};
use super::types::{EdgeId, NodeAttributes, NodeId, NodeState};

const FRAME_DT: f32 = 0.016;

/// Finds containers with `document.getElementById`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomLookup;

impl ContainerLookup for DomLookup {
	type Container = Element;

	fn find(&self, id: &str) -> Option<Element> {
		web_sys::window()?.document()?.get_element_by_id(id)
	}
}

type Listener = (&'static str, Closure<dyn FnMut(MouseEvent)>);
type ClickSlot = Rc<RefCell<Option<NodeClickHandler>>>;
type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Draws into a `<canvas>` appended to the container and lays the graph
/// out with a force simulation stepped on every animation frame.
pub struct CanvasEngine {
	state: Rc<RefCell<SceneState>>,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	listeners: Vec<Listener>,
	wheel: Closure<dyn FnMut(WheelEvent)>,
	resize: Closure<dyn FnMut()>,
	on_click: ClickSlot,
	// the frame closure re-arms itself through this slot; Drop empties it
	animation: FrameSlot,
	frame: Rc<Cell<i32>>,
	stopped: Rc<Cell<bool>>,
}

fn local_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn mouse_listener(
	state: &Rc<RefCell<SceneState>>,
	canvas: &HtmlCanvasElement,
	on_event: impl Fn(&mut SceneState, f64, f64) + 'static,
) -> Closure<dyn FnMut(MouseEvent)> {
	let (state, canvas) = (state.clone(), canvas.clone());
	Closure::new(move |ev: MouseEvent| {
		let (x, y) = local_point(&canvas, &ev);
		on_event(&mut state.borrow_mut(), x, y);
	})
}

/// Ends the drag and, when the release is a click on a node, hands its id
/// to the click handler once the scene is no longer borrowed.
fn release_listener(
	state: &Rc<RefCell<SceneState>>,
	canvas: &HtmlCanvasElement,
	on_click: &ClickSlot,
) -> Closure<dyn FnMut(MouseEvent)> {
	let (state, canvas, on_click) = (state.clone(), canvas.clone(), on_click.clone());
	Closure::new(move |ev: MouseEvent| {
		let (x, y) = local_point(&canvas, &ev);
		let clicked = {
			let mut s = state.borrow_mut();
			s.pointer_up(x, y)
				.and_then(|key| Some(s.node(key)?.id.clone()))
		};
		let Some(id) = clicked else {
			return;
		};
		debug!("node {id} clicked");
		// taken out so the handler may call back into the view or replace itself
		let Some(mut handler) = on_click.borrow_mut().take() else {
			return;
		};
		handler(&id);
		let mut slot = on_click.borrow_mut();
		if slot.is_none() {
			*slot = Some(handler);
		}
	})
}

impl CanvasEngine {
	/// Read access to the nodes, edges and layout being drawn.
	pub fn scene(&self) -> std::cell::Ref<'_, SceneState> {
		self.state.borrow()
	}

	fn start_animation(&self) -> Result<(), ViewError> {
		let (state, ctx, stopped, frame, animate) = (
			self.state.clone(),
			self.ctx.clone(),
			self.stopped.clone(),
			self.frame.clone(),
			self.animation.clone(),
		);
		*self.animation.borrow_mut() = Some(Closure::new(move || {
			if stopped.get() {
				return;
			}
			{
				let mut s = state.borrow_mut();
				if s.animation_running {
					s.tick(FRAME_DT);
				}
				render::render(&s, &ctx);
			}
			if let (Some(window), Some(cb)) = (web_sys::window(), animate.borrow().as_ref()) {
				if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
					frame.set(id);
				}
			}
		}));

		let window = web_sys::window().ok_or_else(|| ViewError::Host("no window".into()))?;
		if let Some(cb) = self.animation.borrow().as_ref() {
			self.frame
				.set(window.request_animation_frame(cb.as_ref().unchecked_ref())?);
		}
		Ok(())
	}
}

impl RenderEngine for CanvasEngine {
	type Container = Element;
	type NodeHandle = NodeKey;
	type EdgeHandle = EdgeKey;

	fn init(container: Element) -> Result<Self, ViewError> {
		let document = container
			.owner_document()
			.ok_or_else(|| ViewError::Host("container is not attached to a document".into()))?;
		let canvas: HtmlCanvasElement = document
			.create_element("canvas")?
			.dyn_into()
			.map_err(|_| ViewError::Host("created element is not a canvas".into()))?;

		let width = match container.client_width() {
			0 => 800.0,
			w => w as f64,
		};
		let height = match container.client_height() {
			0 => 600.0,
			h => h as f64,
		};
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);
		canvas.set_class_name("network-view-canvas");
		canvas
			.style()
			.set_property("display", "block")?;
		canvas.style().set_property("cursor", "grab")?;
		container.append_child(&canvas)?;

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or_else(|| ViewError::Host("2d context unavailable".into()))?
			.dyn_into()
			.map_err(|_| ViewError::Host("2d context has the wrong type".into()))?;

		let state = Rc::new(RefCell::new(SceneState::new(width, height)));
		let on_click: ClickSlot = Rc::new(RefCell::new(None));

		let listeners: Vec<Listener> = vec![
			(
				"mousedown",
				mouse_listener(&state, &canvas, |s, x, y| s.pointer_down(x, y)),
			),
			(
				"mousemove",
				mouse_listener(&state, &canvas, |s, x, y| s.pointer_move(x, y)),
			),
			("mouseup", release_listener(&state, &canvas, &on_click)),
			(
				"mouseleave",
				mouse_listener(&state, &canvas, |s, _, _| s.pointer_leave()),
			),
		];
		for (event, cb) in &listeners {
			canvas.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
		}

		let (state_wh, canvas_wh) = (state.clone(), canvas.clone());
		let wheel: Closure<dyn FnMut(WheelEvent)> = Closure::new(move |ev: WheelEvent| {
			ev.prevent_default();
			let (x, y) = local_point(&canvas_wh, &ev);
			state_wh.borrow_mut().wheel(x, y, ev.delta_y());
		});
		canvas.add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())?;

		let (state_rs, canvas_rs) = (state.clone(), canvas.clone());
		let resize: Closure<dyn FnMut()> = Closure::new(move || {
			let (w, h) = (container.client_width(), container.client_height());
			if w == 0 || h == 0 {
				return;
			}
			canvas_rs.set_width(w as u32);
			canvas_rs.set_height(h as u32);
			state_rs.borrow_mut().resize(w as f64, h as f64);
		});
		if let Some(window) = web_sys::window() {
			window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
		}

		let engine = Self {
			state,
			canvas,
			ctx,
			listeners,
			wheel,
			resize,
			on_click,
			animation: Rc::new(RefCell::new(None)),
			frame: Rc::new(Cell::new(0)),
			stopped: Rc::new(Cell::new(false)),
		};
		engine.start_animation()?;
		info!("canvas engine ready ({width}x{height})");
		Ok(engine)
	}

	fn drawing_properties(&mut self, props: &DrawingProperties) {
		self.state.borrow_mut().drawing = props.clone();
	}

	fn graph_properties(&mut self, props: &GraphProperties) {
		self.state.borrow_mut().graph_props = props.clone();
	}

	fn add_node(&mut self, id: &NodeId, attributes: NodeAttributes) -> NodeKey {
		self.state.borrow_mut().add_node(id, attributes)
	}

	fn add_edge(&mut self, label: &EdgeId, from: &NodeId, to: &NodeId) -> EdgeKey {
		self.state.borrow_mut().add_edge(label, from, to)
	}

	fn set_edge_weight(&mut self, edge: &EdgeKey, weight: f64) {
		self.state.borrow_mut().set_edge_weight(*edge, weight);
	}

	fn remove_node(&mut self, node: &NodeKey) {
		self.state.borrow_mut().remove_node(*node);
	}

	fn remove_edge(&mut self, edge: &EdgeKey) {
		self.state.borrow_mut().remove_edge(*edge);
	}

	fn move_node(&mut self, node: &NodeKey, x: f64, y: f64) {
		self.state.borrow_mut().move_node(*node, x, y);
	}

	fn node_position(&self, node: &NodeKey) -> Option<(f64, f64)> {
		self.state.borrow().node_position(*node)
	}

	fn set_node_state(&mut self, node: &NodeKey, state: NodeState) {
		self.state.borrow_mut().set_node_state(*node, state);
	}

	fn on_node_click(&mut self, handler: NodeClickHandler) {
		*self.on_click.borrow_mut() = Some(handler);
	}

	fn clear(&mut self) {
		self.state.borrow_mut().clear();
	}

	fn draw(&mut self) {
		let mut s = self.state.borrow_mut();
		if s.graph_props.auto_rescale {
			s.fit_to_view();
		}
		debug!("draw {} nodes", s.node_count());
		render::render(&s, &self.ctx);
	}
}

impl Drop for CanvasEngine {
	fn drop(&mut self) {
		self.stopped.set(true);
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(self.frame.get());
		}
		self.animation.borrow_mut().take();
		self.on_click.borrow_mut().take();
		for (event, cb) in &self.listeners {
			let _ = self
				.canvas
				.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
		}
		let _ = self
			.canvas
			.remove_event_listener_with_callback("wheel", self.wheel.as_ref().unchecked_ref());
		if let Some(window) = web_sys::window() {
			let _ = window
				.remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
		}
		self.canvas.remove();
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn container() -> Element {
		let document = web_sys::window().unwrap().document().unwrap();
		let div = document.create_element("div").unwrap();
		document.body().unwrap().append_child(&div).unwrap();
		div
	}

	#[wasm_bindgen_test]
	fn dropping_the_engine_releases_the_scene() {
		let engine = CanvasEngine::init(container()).unwrap();
		let scene = Rc::downgrade(&engine.state);
		let frame_slot = Rc::downgrade(&engine.animation);
		drop(engine);
		assert!(scene.upgrade().is_none());
		assert!(frame_slot.upgrade().is_none());
	}
}
