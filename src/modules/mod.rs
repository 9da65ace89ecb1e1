pub mod books;
pub mod borrowers;
pub mod loans;
pub mod storage;

use libris_kernel::ModuleRegistry;

use crate::library::LibraryService;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, library: &LibraryService) {
    registry.register_core(storage::create_module(library.clone()));

    registry.register_custom(books::create_module(library.clone()));
    registry.register_custom(borrowers::create_module(library.clone()));
    registry.register_custom(loans::create_module(library.clone()));
}

/// Registry with every module wired to `library`.
pub fn registry(library: &LibraryService) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    register_all(&mut registry, library);
    registry
}
