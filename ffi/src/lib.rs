//! C-ABI wrapper around `carangas-rest`.
//!
//! # Overview
//! Exposes the cars and brand catalog operations through `extern "C"`
//! functions taking completion continuations, so a mobile host can drive the
//! access layer without linking to Rust's async runtime directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Each client owns a multi-thread tokio runtime and its access layer is
//!   bound to it, so operations may be called from any host thread. They
//!   return as soon as the exchange is scheduled; continuations run on a
//!   runtime thread and the host must hop to its UI thread before touching
//!   UI state.
//! - Callback parameters are nullable function pointers. An operation given a
//!   null callback returns `false`.
//! - An operation that returns `true` invokes its continuation once, with the
//!   single exception of a cars listing answered by 200 without a body, which
//!   invokes neither. One that returns `false` never invokes it.
//! - Lists and messages passed to continuations are borrowed for the duration
//!   of the call; copy anything that must outlive it. Never free a client from
//!   inside one of its own continuations.

pub mod types;

use std::ffi::{c_void, CStr};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use carangas_core::{parse_price, FuelType};
use carangas_rest::{RestConfig, TransportConfig};

use types::*;

pub type CarListCallback = Option<extern "C" fn(user_data: *mut c_void, cars: *const FfiCarList)>;
pub type ErrorCallback = Option<
    extern "C" fn(user_data: *mut c_void, code: FfiErrorCode, http_status: u16, message: *const c_char),
>;
/// `brands` is null when the catalog is unavailable.
pub type BrandListCallback =
    Option<extern "C" fn(user_data: *mut c_void, brands: *const FfiBrandList)>;
pub type CompletionCallback = Option<extern "C" fn(user_data: *mut c_void, success: bool)>;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client for the given services. A null URL selects the default
/// endpoint for that service.
///
/// Returns null if the runtime or the shared transport cannot be built.
/// The caller must free the returned pointer with `carangas_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn carangas_client_new(
    cars_url: *const c_char,
    brands_url: *const c_char,
) -> *mut FfiCarangasClient {
    catch_unwind(|| {
        let mut config = RestConfig::default();
        if let Some(url) = unsafe { opt_str(cars_url) } {
            config = config.with_cars_url(url);
        }
        if let Some(url) = unsafe { opt_str(brands_url) } {
            config = config.with_brands_url(url);
        }

        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .thread_name("carangas-rest")
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!(error = %e, "failed to start runtime");
                return std::ptr::null_mut();
            }
        };
        let rest = {
            let _guard = runtime.enter();
            carangas_rest::Rest::new(config)
        };
        let rest = match rest {
            Ok(rest) => rest,
            Err(e) => {
                tracing::error!(error = %e, "failed to build transport");
                return std::ptr::null_mut();
            }
        };
        Box::into_raw(Box::new(FfiCarangasClient { runtime, rest }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `carangas_client_new`. Safe to call with null.
/// Exchanges still in flight are abandoned and their continuations never run.
#[unsafe(no_mangle)]
pub extern "C" fn carangas_client_free(client: *mut FfiCarangasClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            let FfiCarangasClient { runtime, rest } = *unsafe { Box::from_raw(client) };
            drop(rest);
            runtime.shutdown_background();
        }));
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// List all cars.
///
/// Returns false (and schedules nothing) if `client` or either callback is
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn carangas_list_cars(
    client: *const FfiCarangasClient,
    user_data: *mut c_void,
    on_success: CarListCallback,
    on_error: ErrorCallback,
) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        let (Some(on_success), Some(on_error)) = (on_success, on_error) else {
            return false;
        };
        if client.is_null() {
            return false;
        }
        let client = unsafe { &*client };
        let user_data = UserData::new(user_data);
        client.rest.list_cars_then(
            move |cars| {
                let owned = OwnedCarList::new(cars);
                let view = owned.view();
                on_success(user_data.get(), &view);
            },
            move |err| {
                let (code, status, message) = describe(&err);
                on_error(user_data.get(), code, status, message.as_ptr());
            },
        );
        true
    }))
    .unwrap_or(false)
}

/// Fetch the brand catalog. The continuation receives null when the catalog
/// is unavailable for any reason.
///
/// Returns false (and schedules nothing) if `client` or `on_complete` is null.
#[unsafe(no_mangle)]
pub extern "C" fn carangas_list_brands(
    client: *const FfiCarangasClient,
    user_data: *mut c_void,
    on_complete: BrandListCallback,
) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        let Some(on_complete) = on_complete else {
            return false;
        };
        if client.is_null() {
            return false;
        }
        let client = unsafe { &*client };
        let user_data = UserData::new(user_data);
        client.rest.list_brands_then(move |brands| match brands {
            Some(brands) => {
                let owned = OwnedBrandList::new(brands);
                let view = owned.view();
                on_complete(user_data.get(), &view);
            }
            None => on_complete(user_data.get(), std::ptr::null()),
        });
        true
    }))
    .unwrap_or(false)
}

#[derive(Clone, Copy)]
enum Mutation {
    Save,
    Update,
    Delete,
}

/// Shared body of save, update and delete. The car is copied before this
/// returns, so the caller may release it immediately.
fn schedule_mutation(
    client: *const FfiCarangasClient,
    car: *const FfiCar,
    user_data: *mut c_void,
    on_complete: CompletionCallback,
    mutation: Mutation,
) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        let Some(on_complete) = on_complete else {
            return false;
        };
        if client.is_null() || car.is_null() {
            return false;
        }
        let client = unsafe { &*client };
        let car = unsafe { (*car).to_core() };
        let user_data = UserData::new(user_data);
        let done = move |ok: bool| on_complete(user_data.get(), ok);
        match mutation {
            Mutation::Save => client.rest.save_then(car, done),
            Mutation::Update => client.rest.update_then(car, done),
            Mutation::Delete => client.rest.delete_then(car, done),
        };
        true
    }))
    .unwrap_or(false)
}

/// Create a car on the backend. Success means status 200 with a body.
#[unsafe(no_mangle)]
pub extern "C" fn carangas_save(
    client: *const FfiCarangasClient,
    car: *const FfiCar,
    user_data: *mut c_void,
    on_complete: CompletionCallback,
) -> bool {
    schedule_mutation(client, car, user_data, on_complete, Mutation::Save)
}

/// Replace the car at `/cars/{id}`. A car without an id completes with false.
#[unsafe(no_mangle)]
pub extern "C" fn carangas_update(
    client: *const FfiCarangasClient,
    car: *const FfiCar,
    user_data: *mut c_void,
    on_complete: CompletionCallback,
) -> bool {
    schedule_mutation(client, car, user_data, on_complete, Mutation::Update)
}

/// Delete the car at `/cars/{id}`. A car without an id completes with false.
#[unsafe(no_mangle)]
pub extern "C" fn carangas_delete(
    client: *const FfiCarangasClient,
    car: *const FfiCar,
    user_data: *mut c_void,
    on_complete: CompletionCallback,
) -> bool {
    schedule_mutation(client, car, user_data, on_complete, Mutation::Delete)
}

// ---------------------------------------------------------------------------
// Presentation helpers
// ---------------------------------------------------------------------------

/// Display label for a fuel code. The returned string is static; do not free.
#[unsafe(no_mangle)]
pub extern "C" fn carangas_fuel_label(code: i32) -> *const c_char {
    let label: &'static CStr = match FuelType::from_code(code) {
        FuelType::Flex => c"Flex",
        FuelType::Alcohol => c"Alcohol",
        FuelType::Gasoline => c"Gasoline",
    };
    label.as_ptr()
}

/// Coerce the form's price text. Empty text is 0. Returns false and leaves
/// `out` untouched when the text is not a non-negative number.
#[unsafe(no_mangle)]
pub extern "C" fn carangas_parse_price(text: *const c_char, out: *mut f64) -> bool {
    catch_unwind(|| {
        if text.is_null() || out.is_null() {
            return false;
        }
        let text = unsafe { opt_str(text) }.unwrap_or_default();
        match parse_price(&text) {
            Ok(price) => {
                unsafe { *out = price };
                true
            }
            Err(_) => false,
        }
    })
    .unwrap_or(false)
}

/// Whether the transport policy permits cellular networks. The host applies
/// this to its platform network configuration.
#[unsafe(no_mangle)]
pub extern "C" fn carangas_transport_allows_cellular() -> bool {
    TransportConfig::default().allow_cellular
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
