//! Event listeners on the server-rendered calculator page.
//!
//! Call [`init_page`] once after the DOM is ready. Each binding is optional:
//! pages without a given control simply get no listener for it.

use crate::dom::{BrowserPrompt, DomForm, DomPresetButton};
use seq_core::form::fields;
use seq_core::preset::apply_preset;
use seq_core::slider::{SliderBinding, DEFAULT_SLIDERS};
use seq_core::validate::should_submit;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlInputElement};

/// Attach every calculator listener.
pub fn init_page(document: &Document) -> Result<(), JsValue> {
    bind_sliders(document)?;
    bind_presets(document)?;
    bind_validation(document)?;
    log::info!("Calculator page wired");
    Ok(())
}

/// Keep each slider's label(s) in step with its value.
pub fn bind_sliders(document: &Document) -> Result<(), JsValue> {
    for binding in DEFAULT_SLIDERS {
        bind_slider(document, binding)?;
    }
    Ok(())
}

fn bind_slider(document: &Document, binding: SliderBinding) -> Result<(), JsValue> {
    let Some(input) = document
        .get_element_by_id(binding.input_id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        log::debug!("No slider #{} on this page", binding.input_id);
        return Ok(());
    };

    let form = DomForm::new(document.clone());
    // Labels may be stale after a back/forward navigation
    binding.sync(&input.value(), &form);

    let slider = input.clone();
    let input_cb = Closure::wrap(Box::new(move |_event: Event| {
        binding.sync(&slider.value(), &form);
    }) as Box<dyn FnMut(_)>);
    input.add_event_listener_with_callback("input", input_cb.as_ref().unchecked_ref())?;
    input_cb.forget();
    Ok(())
}

/// Apply a scenario preset and resubmit when its button is clicked.
pub fn bind_presets(document: &Document) -> Result<(), JsValue> {
    let buttons = Rc::new(DomPresetButton::all(document));
    for index in 0..buttons.len() {
        let all = Rc::clone(&buttons);
        let form = DomForm::new(document.clone());
        let click_cb = Closure::wrap(Box::new(move |_event: Event| {
            if let Err(e) = apply_preset(all.as_slice(), index, &form) {
                log::warn!("Ignoring preset click: {}", e);
            }
        }) as Box<dyn FnMut(_)>);
        buttons[index]
            .element()
            .add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())?;
        click_cb.forget();
    }
    log::debug!("Bound {} preset buttons", buttons.len());
    Ok(())
}

/// Check the year and emission fields before the form is submitted.
pub fn bind_validation(document: &Document) -> Result<(), JsValue> {
    let Some(form_element) = document.get_element_by_id(fields::FORM) else {
        log::debug!("No #{} on this page", fields::FORM);
        return Ok(());
    };

    let form = DomForm::new(document.clone());
    let submit_cb = Closure::wrap(Box::new(move |event: Event| {
        if !should_submit(&form, &BrowserPrompt) {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    form_element.add_event_listener_with_callback("submit", submit_cb.as_ref().unchecked_ref())?;
    submit_cb.forget();
    Ok(())
}
