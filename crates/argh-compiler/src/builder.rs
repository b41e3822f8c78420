use argh_core::{DomainConfig, RegistryError, SiteRegistry};

use crate::parser::{parse_site_definitions, OrderedMap, SiteDefinition};
use crate::CompileError;

/// Compile a site definition file into a registry.
pub fn compile_sites(text: &str) -> Result<SiteRegistry, CompileError> {
    let definitions = parse_site_definitions(text)?;
    build_registry(definitions)
}

pub fn build_registry(definitions: Vec<SiteDefinition>) -> Result<SiteRegistry, CompileError> {
    let mut sites = Vec::with_capacity(definitions.len());
    for definition in definitions {
        sites.push(build_domain_config(definition)?);
    }
    Ok(SiteRegistry::new(sites)?)
}

pub fn build_domain_config(definition: SiteDefinition) -> Result<DomainConfig, RegistryError> {
    let mut builder = DomainConfig::builder(definition.domain);

    for (label, fragment) in definition.page_types {
        builder = builder.page_type(label, fragment);
    }
    if let Some(paths) = definition.paths {
        builder = builder.paths(paths);
    }
    for (label, containers) in definition.page_containers {
        builder = builder.containers(label, containers);
    }
    for (label, content) in definition.container_content {
        builder = builder.content(label, content);
    }
    if let Some(behaviour) = definition.additional_block_behaviour {
        builder = builder.root_classes(behaviour);
    }

    builder.build()
}

/// Convert a registry back into site definitions.
///
/// Custom hooks have no data form and are dropped.
pub fn export_definitions(registry: &SiteRegistry) -> Vec<SiteDefinition> {
    registry
        .iter()
        .map(|config| {
            let additional_block_behaviour = config.block_hook().and_then(|hook| {
                let behaviour = hook.as_root_classes().cloned();
                if behaviour.is_none() {
                    log::warn!("{}: custom block behaviour cannot be exported", config.domain());
                }
                behaviour
            });

            SiteDefinition {
                domain: config.domain().to_string(),
                page_types: OrderedMap(
                    config
                        .page_types()
                        .iter()
                        .map(|m| (m.label().to_string(), m.fragment().to_string()))
                        .collect(),
                ),
                paths: config
                    .paths()
                    .map(|filters| filters.iter().map(|f| f.fragment().to_string()).collect()),
                page_containers: OrderedMap(
                    config
                        .page_container_entries()
                        .into_iter()
                        .map(|(label, containers)| (label.to_string(), containers.to_vec()))
                        .collect(),
                ),
                container_content: OrderedMap(
                    config
                        .container_content_entries()
                        .into_iter()
                        .map(|(label, content)| (label.to_string(), content.clone()))
                        .collect(),
                ),
                additional_block_behaviour,
            }
        })
        .collect()
}

/// Write a registry as a pretty-printed site definition file.
pub fn export_sites(registry: &SiteRegistry) -> Result<String, CompileError> {
    let sites = OrderedMap(
        export_definitions(registry)
            .into_iter()
            .map(|definition| (definition.domain.clone(), definition))
            .collect(),
    );
    Ok(serde_json::to_string_pretty(&sites)?)
}
