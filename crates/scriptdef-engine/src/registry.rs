//! Profile registry: the build, settings and init script profiles

use crate::class_context::ClassContext;
use crate::profile::{build_profile, CompilationProfile, ScriptFlavor};
use crate::refine::{RefineConfiguration, ResolverRefinement};
use scriptdef_resolver::DependencyResolver;
use std::sync::Arc;

/// The three script profiles
///
/// Built once and shared read-only; all three use the same refinement hook.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    build: CompilationProfile,
    settings: CompilationProfile,
    init: CompilationProfile,
}

impl ProfileRegistry {
    /// Profiles refined through `hook`
    pub fn new(class_context: &ClassContext, hook: Arc<dyn RefineConfiguration>) -> Self {
        let profile = |flavor: ScriptFlavor| {
            build_profile(flavor, flavor.implicit_receiver(), class_context, Arc::clone(&hook))
        };

        Self {
            build: profile(ScriptFlavor::Build),
            settings: profile(ScriptFlavor::Settings),
            init: profile(ScriptFlavor::Init),
        }
    }

    /// Profiles refined through `resolver`
    pub fn with_resolver(class_context: &ClassContext, resolver: Arc<dyn DependencyResolver>) -> Self {
        Self::new(class_context, Arc::new(ResolverRefinement::new(resolver)))
    }

    pub fn get(&self, flavor: ScriptFlavor) -> &CompilationProfile {
        match flavor {
            ScriptFlavor::Build => &self.build,
            ScriptFlavor::Settings => &self.settings,
            ScriptFlavor::Init => &self.init,
        }
    }

    /// Look a profile up by its registry name (`build-script`, ...)
    pub fn by_name(&self, name: &str) -> Option<&CompilationProfile> {
        self.profiles().find(|profile| profile.name() == name)
    }

    pub fn build_script(&self) -> &CompilationProfile {
        &self.build
    }

    pub fn settings_script(&self) -> &CompilationProfile {
        &self.settings
    }

    pub fn init_script(&self) -> &CompilationProfile {
        &self.init
    }

    /// All profiles, in flavor order
    pub fn profiles(&self) -> impl Iterator<Item = &CompilationProfile> {
        ScriptFlavor::ALL.into_iter().map(move |flavor| self.get(flavor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptdef_resolver::MockResolver;

    #[test]
    fn registry_names() {
        let registry = ProfileRegistry::with_resolver(&ClassContext::new(), Arc::new(MockResolver::new()));

        assert_eq!(registry.build_script().name(), "build-script");
        assert_eq!(registry.settings_script().name(), "settings-script");
        assert_eq!(registry.init_script().name(), "init-script");
        assert_eq!(registry.by_name("settings-script").map(|p| p.flavor()), Some(ScriptFlavor::Settings));
        assert!(registry.by_name("plugin-script").is_none());
        assert_eq!(registry.profiles().count(), 3);
    }

    #[test]
    fn profiles_share_one_hook() {
        let registry = ProfileRegistry::with_resolver(&ClassContext::new(), Arc::new(MockResolver::new()));

        let build = registry.build_script().before_compiling().unwrap();
        let init = registry.init_script().before_compiling().unwrap();
        assert!(Arc::ptr_eq(build, init));
    }
}
