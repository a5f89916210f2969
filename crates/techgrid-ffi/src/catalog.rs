use std::ffi::CStr;
use std::os::raw::c_char;
use techgrid::core::models::catalog::ModuleCatalog;
use techgrid::core::models::ids::ModuleKey;
use techgrid::core::models::module::{AdjacencyKind, Module};

/// Opaque handle to a module catalog.
///
/// Modules are identified by the index returned from
/// [`tg_catalog_add_module`]; `keys` preserves insertion order so indices
/// stay stable across the whole API.
pub struct TgCatalog {
    pub(crate) inner: ModuleCatalog,
    pub(crate) keys: Vec<ModuleKey>,
}

/// Creates an empty catalog.
#[unsafe(no_mangle)]
pub extern "C" fn tg_catalog_new() -> *mut TgCatalog {
    Box::into_raw(Box::new(TgCatalog {
        inner: ModuleCatalog::new(),
        keys: Vec::new(),
    }))
}

/// Frees a catalog handle. A null pointer is a no-op.
///
/// # Safety
///
/// The pointer must have been allocated by `tg_catalog_new` and must not
/// be used after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_catalog_free(ptr: *mut TgCatalog) {
    if !ptr.is_null() {
        drop(unsafe { Box::from_raw(ptr) });
    }
}

/// Adds a module to the catalog and returns its index, or -1 if the input
/// is rejected (null handle or strings, non-UTF-8 strings, an unknown
/// adjacency code, or a duplicate id).
///
/// `adjacency` is 0 for none, 1 for lesser, 2 for greater.
///
/// # Safety
///
/// The catalog pointer must be a valid handle allocated by
/// `tg_catalog_new`; `id` and `tech` must be valid NUL-terminated C
/// strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_catalog_add_module(
    ptr: *mut TgCatalog,
    id: *const c_char,
    tech: *const c_char,
    adjacency: i32,
    base_bonus: f64,
    adjacency_bonus: f64,
    sc_eligible: bool,
    active: bool,
) -> i32 {
    if ptr.is_null() || id.is_null() || tech.is_null() {
        return -1;
    }
    let catalog = unsafe { &mut *ptr };
    let (Ok(id), Ok(tech)) = (
        unsafe { CStr::from_ptr(id) }.to_str(),
        unsafe { CStr::from_ptr(tech) }.to_str(),
    ) else {
        return -1;
    };
    let adjacency = match adjacency {
        0 => AdjacencyKind::None,
        1 => AdjacencyKind::Lesser,
        2 => AdjacencyKind::Greater,
        _ => return -1,
    };

    let module = Module {
        id: id.to_string(),
        tech: tech.to_string(),
        adjacency,
        base_bonus,
        adjacency_bonus,
        sc_eligible,
        active,
    };
    match catalog.inner.insert(module) {
        Ok(key) => {
            catalog.keys.push(key);
            (catalog.keys.len() - 1) as i32
        }
        Err(_) => -1,
    }
}

/// Returns the number of modules in the catalog.
///
/// # Panics
///
/// Panics if called with a null pointer.
///
/// # Safety
///
/// The pointer must be a valid handle allocated by `tg_catalog_new`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tg_catalog_len(ptr: *const TgCatalog) -> usize {
    assert!(!ptr.is_null(), "called `tg_catalog_len` with null pointer");
    unsafe { &*ptr }.inner.len()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::ffi::CString;
    use std::ptr::{null, null_mut};

    pub(crate) unsafe fn add(
        cat: *mut TgCatalog,
        id: &str,
        tech: &str,
        adjacency: i32,
        base_bonus: f64,
        adjacency_bonus: f64,
        sc_eligible: bool,
    ) -> i32 {
        let id = CString::new(id).unwrap();
        let tech = CString::new(tech).unwrap();
        unsafe {
            tg_catalog_add_module(
                cat,
                id.as_ptr(),
                tech.as_ptr(),
                adjacency,
                base_bonus,
                adjacency_bonus,
                sc_eligible,
                true,
            )
        }
    }

    #[test]
    fn indices_follow_insertion_order() {
        unsafe {
            let cat = tg_catalog_new();
            assert_eq!(add(cat, "alpha", "weapons", 2, 1.0, 0.25, true), 0);
            assert_eq!(add(cat, "beta", "weapons", 1, 0.5, 0.1, false), 1);
            assert_eq!(tg_catalog_len(cat), 2);
            tg_catalog_free(cat);
        }
    }

    #[test]
    fn duplicate_ids_and_bad_codes_are_rejected() {
        unsafe {
            let cat = tg_catalog_new();
            assert_eq!(add(cat, "alpha", "weapons", 0, 1.0, 0.0, false), 0);
            assert_eq!(add(cat, "alpha", "weapons", 0, 1.0, 0.0, false), -1);
            assert_eq!(add(cat, "gamma", "weapons", 9, 1.0, 0.0, false), -1);
            assert_eq!(tg_catalog_len(cat), 1);
            tg_catalog_free(cat);
        }
    }

    #[test]
    fn null_arguments_are_rejected() {
        unsafe {
            let cat = tg_catalog_new();
            assert_eq!(
                tg_catalog_add_module(null_mut(), null(), null(), 0, 0.0, 0.0, false, true),
                -1
            );
            assert_eq!(
                tg_catalog_add_module(cat, null(), null(), 0, 0.0, 0.0, false, true),
                -1
            );
            tg_catalog_free(cat);
        }
    }
}
