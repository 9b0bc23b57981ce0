use std::cell::RefCell;
use std::rc::Rc;

use leptos::callback::UnsyncCallback;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, ResizeObserver, Window,
};

use super::config::EvidenceMapConfig;
use super::detail::{DetailPanel, NodeDetail};
use super::graph::{NodeId, StanceCounts};
use super::layout::Viewport;
use super::legend::EvidenceLegend;
use super::render;
use super::state::EvidenceMapState;
use super::types::EvidenceInput;

type SharedState = Rc<RefCell<Option<EvidenceMapState>>>;

/// Keeps the viewport source under watch, and stops watching when dropped.
///
/// Fullscreen maps follow the window's `resize` event; container maps observe
/// the canvas's parent element so layout-driven size changes are seen too.
enum ResizeSubscription {
	Window {
		window: Window,
		callback: Closure<dyn FnMut()>,
	},
	Container {
		observer: ResizeObserver,
		_callback: Closure<dyn FnMut(js_sys::Array)>,
	},
}

impl ResizeSubscription {
	fn window(on_resize: impl FnMut() + 'static) -> Option<Self> {
		let Some(window) = web_sys::window() else {
			warn!("evidence map: no window, resize tracking disabled");
			return None;
		};
		let callback = Closure::<dyn FnMut()>::new(on_resize);
		if let Err(err) =
			window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
		{
			warn!("evidence map: failed to add resize listener: {err:?}");
			return None;
		}
		Some(Self::Window { window, callback })
	}

	fn container(target: &Element, mut on_resize: impl FnMut() + 'static) -> Option<Self> {
		let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
			on_resize()
		});
		let observer = match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
			Ok(observer) => observer,
			Err(err) => {
				warn!("evidence map: failed to create resize observer: {err:?}");
				return None;
			}
		};
		observer.observe(target);
		Some(Self::Container {
			observer,
			_callback: callback,
		})
	}
}

impl Drop for ResizeSubscription {
	fn drop(&mut self) {
		match self {
			Self::Window { window, callback } => {
				let _ = window
					.remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
			}
			Self::Container { observer, .. } => observer.disconnect(),
		}
		info!("evidence map resize tracking released");
	}
}

#[derive(Clone, Copy)]
struct Sizing {
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
	fallback: (f64, f64),
}

impl Sizing {
	fn measure(&self, canvas: &HtmlCanvasElement) -> (f64, f64) {
		if self.fullscreen {
			let window = web_sys::window();
			let dim = |v: Option<JsValue>, fallback: f64| v.and_then(|v| v.as_f64()).unwrap_or(fallback);
			return (
				dim(window.as_ref().and_then(|w| w.inner_width().ok()), self.fallback.0),
				dim(window.as_ref().and_then(|w| w.inner_height().ok()), self.fallback.1),
			);
		}
		let parent = canvas.parent_element();
		(
			self.width.unwrap_or_else(|| {
				parent
					.as_ref()
					.map(|p| p.client_width() as f64)
					.filter(|w| *w > 0.0)
					.unwrap_or(self.fallback.0)
			}),
			self.height.unwrap_or_else(|| {
				parent
					.as_ref()
					.map(|p| p.client_height() as f64)
					.filter(|h| *h > 0.0)
					.unwrap_or(self.fallback.1)
			}),
		)
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn canvas_element(canvas_ref: NodeRef<leptos::html::Canvas>) -> Option<HtmlCanvasElement> {
	canvas_ref.get().map(Into::into)
}

fn redraw(canvas: &HtmlCanvasElement, state: &SharedState) {
	let Some(ctx) = context_2d(canvas) else {
		warn!("evidence map: 2d context unavailable, skipping draw");
		return;
	};
	if let Some(ref s) = *state.borrow() {
		render::render(s, &ctx);
	}
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn selected_id(state: &SharedState) -> Option<NodeId> {
	state
		.borrow()
		.as_ref()
		.and_then(|s| s.selection.node_id().cloned())
}

/// Interactive evidence map: verdict, claims and citations as a radial node-link diagram.
#[component]
pub fn EvidenceMap(
	#[prop(into)] data: Signal<EvidenceInput>,
	#[prop(optional)] config: EvidenceMapConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	/// Notified whenever the selection changes, including resets.
	#[prop(optional)]
	on_select: Option<Callback<Option<NodeId>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let detail = RwSignal::new(None::<NodeDetail>);
	let counts = RwSignal::new(StanceCounts::default());
	let hovering = RwSignal::new(false);
	let sizing = Sizing {
		fullscreen,
		width,
		height,
		fallback: (config.fallback_width, config.fallback_height),
	};

	// Pushes the state's selection into the panel signals and the caller.
	let publish = {
		let state = state.clone();
		move |before: Option<NodeId>| {
			let after = selected_id(&state);
			if let Some(ref s) = *state.borrow() {
				detail.set(s.detail());
				counts.set(s.graph.stance_counts());
			}
			if before != after {
				if let Some(cb) = on_select {
					cb.run(after);
				}
			}
		}
	};

	let (state_fx, publish_fx, config_fx) = (state.clone(), publish.clone(), config.clone());
	Effect::new(move |_| {
		let input = data.get();
		let Some(canvas) = canvas_element(canvas_ref) else {
			return;
		};
		let (w, h) = sizing.measure(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let before = selected_id(&state_fx);
		{
			let mut slot = state_fx.borrow_mut();
			match slot.as_mut() {
				Some(s) => {
					s.resize(w, h);
					s.rebuild(&input);
				}
				None => {
					info!("evidence map mounted at {w}x{h}");
					*slot = Some(EvidenceMapState::new(
						&input,
						Viewport::new(w, h),
						config_fx.clone(),
					));
				}
			}
		}
		redraw(&canvas, &state_fx);
		publish_fx(before);
	});

	let subscription = StoredValue::new_local(None::<ResizeSubscription>);
	let state_resize = state.clone();
	let on_resize = move || {
		let Some(canvas) = canvas_element(canvas_ref) else {
			return;
		};
		let (w, h) = sizing.measure(&canvas);
		let changed = state_resize
			.borrow_mut()
			.as_mut()
			.is_some_and(|s| s.resize(w, h));
		if changed {
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
			redraw(&canvas, &state_resize);
		}
	};
	if fullscreen {
		subscription.set_value(ResizeSubscription::window(on_resize));
	} else {
		// The parent only exists once the canvas is mounted.
		canvas_ref.on_load(move |canvas: HtmlCanvasElement| {
			match canvas.parent_element() {
				Some(parent) => {
					subscription.set_value(ResizeSubscription::container(&parent, on_resize))
				}
				None => warn!("evidence map: canvas has no parent, resize tracking disabled"),
			}
		});
	}
	on_cleanup(move || {
		subscription.update_value(|s| {
			s.take();
		});
	});

	let (state_click, publish_click) = (state.clone(), publish.clone());
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_element(canvas_ref) else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		let before = selected_id(&state_click);
		if let Some(ref mut s) = *state_click.borrow_mut() {
			s.click(x, y);
		}
		redraw(&canvas, &state_click);
		publish_click(before);
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_element(canvas_ref) else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		let changed = match *state_mm.borrow_mut() {
			Some(ref mut s) => {
				let hovered = s.node_at_position(x, y).cloned();
				hovering.set(hovered.is_some());
				s.set_hover(hovered)
			}
			None => false,
		};
		if changed {
			redraw(&canvas, &state_mm);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let changed = match *state_ml.borrow_mut() {
			Some(ref mut s) => s.set_hover(None),
			None => false,
		};
		hovering.set(false);
		if changed {
			if let Some(canvas) = canvas_element(canvas_ref) {
				redraw(&canvas, &state_ml);
			}
		}
	};

	let state_close = state.clone();
	let on_close = UnsyncCallback::new(move |_: ()| {
		let before = selected_id(&state_close);
		if let Some(ref mut s) = *state_close.borrow_mut() {
			s.clear_selection();
		}
		if let Some(canvas) = canvas_element(canvas_ref) {
			redraw(&canvas, &state_close);
		}
		publish(before);
	});

	view! {
		<div class="evidence-map">
			<canvas
				node_ref=canvas_ref
				class="evidence-map-canvas"
				on:click=on_click
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				style=move || {
					format!(
						"display: block; cursor: {};",
						if hovering.get() { "pointer" } else { "default" },
					)
				}
			/>
			<EvidenceLegend counts=counts palette=config.palette.clone() />
			{move || detail.get().map(|d| view! { <DetailPanel detail=d on_close=on_close /> })}
		</div>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use std::cell::Cell;

	use wasm_bindgen_test::*;
	use web_sys::Event;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn fire_resize() {
		let window = web_sys::window().unwrap();
		window
			.dispatch_event(&Event::new("resize").unwrap())
			.unwrap();
	}

	#[wasm_bindgen_test]
	fn test_window_listener_is_released_on_drop() {
		let fired = Rc::new(Cell::new(0));
		let counter = fired.clone();
		let subscription =
			ResizeSubscription::window(move || counter.set(counter.get() + 1)).unwrap();

		fire_resize();
		assert_eq!(fired.get(), 1);

		drop(subscription);
		fire_resize();
		assert_eq!(fired.get(), 1);
	}

	#[wasm_bindgen_test]
	fn test_container_observer_registers_and_disconnects() {
		let document = web_sys::window().unwrap().document().unwrap();
		let container = document.create_element("div").unwrap();
		let subscription = ResizeSubscription::container(&container, || {});
		assert!(matches!(subscription, Some(ResizeSubscription::Container { .. })));
		drop(subscription);
	}
}
