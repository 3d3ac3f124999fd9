//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*const c_char` instead of `String`, pointer + length instead of `Vec`,
//! and enums with explicit discriminants. Data handed to a continuation is
//! owned by Rust and only valid for the duration of that call; the `Owned*`
//! holders keep the backing `CString`s alive until the continuation returns.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;

use carangas_core::{Brand, Car, RestError};

/// Opaque handle to the access layer and the runtime its exchanges run on.
/// C callers receive a pointer to this and pass it back into every function.
pub struct FfiCarangasClient {
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) rest: carangas_rest::Rest,
}

/// Caller context passed back verbatim to every continuation. The host is
/// responsible for whatever it points to being usable from another thread.
#[derive(Clone, Copy)]
pub(crate) struct UserData(*mut c_void);

unsafe impl Send for UserData {}

impl UserData {
    pub(crate) fn new(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    pub(crate) fn get(self) -> *mut c_void {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A car as seen from C. `id` is null for a car the backend has not
/// assigned an identifier to yet.
#[repr(C)]
pub struct FfiCar {
    pub id: *const c_char,
    pub brand: *const c_char,
    pub name: *const c_char,
    pub price: f64,
    pub gas_type: i32,
}

#[repr(C)]
pub struct FfiCarList {
    pub items: *const FfiCar,
    pub len: u32,
}

/// Brand display names, in catalog order.
#[repr(C)]
pub struct FfiBrandList {
    pub names: *const *const c_char,
    pub len: u32,
}

/// Read a possibly-null C string; invalid UTF-8 reads as empty.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string.
pub(crate) unsafe fn opt_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(
        unsafe { CStr::from_ptr(ptr) }
            .to_str()
            .unwrap_or("")
            .to_string(),
    )
}

impl FfiCar {
    /// Copy a caller-provided car into a core `Car`.
    ///
    /// # Safety
    /// Every non-null string field must be NUL-terminated.
    pub(crate) unsafe fn to_core(&self) -> Car {
        Car {
            id: unsafe { opt_str(self.id) },
            brand: unsafe { opt_str(self.brand) }.unwrap_or_default(),
            gas_type: self.gas_type,
            name: unsafe { opt_str(self.name) }.unwrap_or_default(),
            price: self.price,
        }
    }
}

fn c_string(s: String) -> CString {
    // Interior NULs cannot cross the boundary; cut the string there.
    CString::new(s).unwrap_or_else(|e| {
        let end = e.nul_position();
        let mut bytes = e.into_vec();
        bytes.truncate(end);
        CString::new(bytes).unwrap_or_default()
    })
}

/// Backing storage for an `FfiCarList` handed to a continuation.
pub(crate) struct OwnedCarList {
    _strings: Vec<CString>,
    items: Vec<FfiCar>,
}

impl OwnedCarList {
    pub(crate) fn new(cars: Vec<Car>) -> Self {
        let mut strings = Vec::with_capacity(cars.len() * 3);
        let mut items = Vec::with_capacity(cars.len());
        for car in cars {
            let id = car.id.map(c_string);
            let brand = c_string(car.brand);
            let name = c_string(car.name);
            items.push(FfiCar {
                id: id.as_ref().map_or(std::ptr::null(), |s| s.as_ptr()),
                brand: brand.as_ptr(),
                name: name.as_ptr(),
                price: car.price,
                gas_type: car.gas_type,
            });
            // Moving a CString does not move its heap buffer.
            strings.extend(id);
            strings.push(brand);
            strings.push(name);
        }
        Self {
            _strings: strings,
            items,
        }
    }

    pub(crate) fn view(&self) -> FfiCarList {
        FfiCarList {
            items: if self.items.is_empty() {
                std::ptr::null()
            } else {
                self.items.as_ptr()
            },
            len: self.items.len() as u32,
        }
    }
}

/// Backing storage for an `FfiBrandList` handed to a continuation.
pub(crate) struct OwnedBrandList {
    _strings: Vec<CString>,
    names: Vec<*const c_char>,
}

impl OwnedBrandList {
    pub(crate) fn new(brands: Vec<Brand>) -> Self {
        let strings: Vec<CString> = brands.into_iter().map(|b| c_string(b.name)).collect();
        let names = strings.iter().map(|s| s.as_ptr()).collect();
        Self {
            _strings: strings,
            names,
        }
    }

    pub(crate) fn view(&self) -> FfiBrandList {
        FfiBrandList {
            names: if self.names.is_empty() {
                std::ptr::null()
            } else {
                self.names.as_ptr()
            },
            len: self.names.len() as u32,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// `RestError` as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    InvalidUrl = 1,
    TransportFailure = 2,
    NoResponse = 3,
    NoData = 4,
    UnexpectedStatus = 5,
    MalformedPayload = 6,
}

/// Split an error into its C code, the HTTP status (0 when there is none)
/// and a human-readable message.
pub(crate) fn describe(err: &RestError) -> (FfiErrorCode, u16, CString) {
    let (code, status) = match err {
        RestError::InvalidUrl(_) => (FfiErrorCode::InvalidUrl, 0),
        RestError::TransportFailure(_) => (FfiErrorCode::TransportFailure, 0),
        RestError::NoResponse(_) => (FfiErrorCode::NoResponse, 0),
        RestError::NoData => (FfiErrorCode::NoData, 0),
        RestError::UnexpectedStatus(status) => (FfiErrorCode::UnexpectedStatus, *status),
        RestError::MalformedPayload(_) => (FfiErrorCode::MalformedPayload, 0),
    };
    (code, status, c_string(err.to_string()))
}
