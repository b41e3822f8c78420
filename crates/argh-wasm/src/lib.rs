//! WebAssembly bindings for Argh

use std::sync::OnceLock;

use wasm_bindgen::prelude::*;

use argh_compiler::compile_sites;
use argh_core::{
    BlockElement, BlockSelectors, ContainerContent, ContainerDescriptor, PageInfo,
    SiteRegistry,
};

const ALREADY_INITIALIZED: &str = "Already initialized. Reload the page to reinitialize.";

static REGISTRY: OnceLock<SiteRegistry> = OnceLock::new();

/// Registry set by `init`. Resolving before `init` fixes the built-in table.
fn registry() -> &'static SiteRegistry {
    active_registry(&REGISTRY)
}

fn active_registry(slot: &OnceLock<SiteRegistry>) -> &SiteRegistry {
    slot.get_or_init(|| SiteRegistry::builtin().clone())
}

/// Fill an empty slot; a registry that is in place is never replaced.
fn install_registry(slot: &OnceLock<SiteRegistry>, sites_json: Option<&str>) -> Result<usize, String> {
    if slot.get().is_some() {
        return Err(ALREADY_INITIALIZED.to_string());
    }

    let registry = match sites_json {
        Some(text) => compile_sites(text)
            .map_err(|e| format!("Failed to load site definitions: {}", e))?,
        None => SiteRegistry::builtin().clone(),
    };
    let site_count = registry.len();

    slot.set(registry)
        .map_err(|_| ALREADY_INITIALIZED.to_string())?;
    Ok(site_count)
}

/// Install the site registry. Without `sites_json` the built-in table is used.
///
/// Fails once a registry is in place, including after any resolution call.
#[wasm_bindgen]
pub fn init(sites_json: Option<String>) -> Result<(), JsValue> {
    let site_count = install_registry(&REGISTRY, sites_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))?;

    web_sys::console::debug_1(&JsValue::from_str(&format!("argh: {} sites registered", site_count)));
    Ok(())
}

#[wasm_bindgen]
pub fn is_initialized() -> bool {
    REGISTRY.get().is_some()
}

#[wasm_bindgen]
pub fn registered_domains() -> js_sys::Array {
    let domains = js_sys::Array::new();
    for site in registry().iter() {
        domains.push(&JsValue::from_str(site.domain()));
    }
    domains
}

#[wasm_bindgen]
pub fn get_page_domain(url: &str) -> Option<String> {
    registry().page_domain(url).map(|d| d.to_string())
}

#[wasm_bindgen]
pub fn check_paths(url: &str) -> bool {
    registry().check_paths(url)
}

#[wasm_bindgen]
pub fn get_page_type(url: &str, domain: Option<String>) -> Option<String> {
    registry()
        .page_type(url, domain.as_deref())
        .map(|t| t.to_string())
}

/// Resolve a URL to `{ domain, pageType, pageContainers, containerContent }`,
/// with `null` for whatever did not resolve.
#[wasm_bindgen]
pub fn get_page_info(url: &str) -> JsValue {
    page_info_to_js(&registry().page_info(url))
}

/// Run the domain's block behaviour on a block element.
/// Returns false if the domain has none.
#[wasm_bindgen]
pub fn apply_block_behaviour(domain: &str, block: &web_sys::Element) -> bool {
    match registry().block_behaviour(domain) {
        Some(behaviour) => {
            behaviour.apply(&mut DomBlock(block));
            true
        }
        None => false,
    }
}

struct DomBlock<'a>(&'a web_sys::Element);

impl BlockElement for DomBlock<'_> {
    fn add_class(&mut self, class: &str) {
        if let Err(e) = self.0.class_list().add_1(class) {
            web_sys::console::warn_2(&JsValue::from_str(&format!("argh: cannot add class '{}'", class)), &e);
        }
    }

    fn parent_background_color(&self) -> Option<String> {
        let parent = self.0.parent_element()?;
        let style = web_sys::window()?.get_computed_style(&parent).ok()??;
        style.get_property_value("background-color").ok()
    }
}

fn page_info_to_js(info: &PageInfo<'_>) -> JsValue {
    let result = js_sys::Object::new();

    let domain = info.domain.map(JsValue::from_str).unwrap_or(JsValue::NULL);
    let page_type = info.page_type.map(JsValue::from_str).unwrap_or(JsValue::NULL);
    let containers = info.page_containers.map(containers_to_js).unwrap_or(JsValue::NULL);
    let content = info.container_content.map(content_to_js).unwrap_or(JsValue::NULL);

    let _ = js_sys::Reflect::set(&result, &"domain".into(), &domain);
    let _ = js_sys::Reflect::set(&result, &"pageType".into(), &page_type);
    let _ = js_sys::Reflect::set(&result, &"pageContainers".into(), &containers);
    let _ = js_sys::Reflect::set(&result, &"containerContent".into(), &content);

    result.into()
}

fn containers_to_js(containers: &[ContainerDescriptor]) -> JsValue {
    let array = js_sys::Array::new_with_length(containers.len() as u32);
    for (i, container) in containers.iter().enumerate() {
        let obj = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&obj, &"selector".into(), &JsValue::from_str(&container.selector));
        array.set(i as u32, obj.into());
    }
    array.into()
}

fn content_to_js(content: &ContainerContent) -> JsValue {
    let result = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&result, &"comment".into(), &selectors_to_js(&content.comment));
    result.into()
}

fn selectors_to_js(selectors: &BlockSelectors) -> JsValue {
    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&obj, &"block".into(), &JsValue::from_str(&selectors.block));
    let _ = js_sys::Reflect::set(&obj, &"text".into(), &JsValue::from_str(&selectors.text));
    let _ = js_sys::Reflect::set(
        &obj,
        &"additionalFakeBlockClasses".into(),
        &strings_to_js(&selectors.additional_fake_block_classes),
    );
    let _ = js_sys::Reflect::set(
        &obj,
        &"additionalFakeBlockControlsClasses".into(),
        &strings_to_js(&selectors.additional_fake_block_controls_classes),
    );
    obj.into()
}

fn strings_to_js(values: &[String]) -> js_sys::Array {
    let array = js_sys::Array::new();
    for value in values {
        array.push(&JsValue::from_str(value));
    }
    array
}
