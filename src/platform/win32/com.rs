//! COM apartment lifetime

use windows::core::Error;
use windows::Win32::Foundation::RPC_E_CHANGED_MODE;
use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};

/// Graphics subsystem token: keeps COM initialized on this thread for WIC and
/// Direct2D, and releases it when dropped.
pub struct ComApartment {
    owns_init: bool,
}

impl ComApartment {
    /// Enter a single-threaded apartment on the current thread
    pub fn enter() -> Result<Self, Error> {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };

        if hr == RPC_E_CHANGED_MODE {
            // Host already initialized COM as multithreaded; that still works
            // for WIC, but the host owns the matching CoUninitialize.
            log!("ComApartment: thread already in another apartment, borrowing it");
            return Ok(Self { owns_init: false });
        }

        hr.ok()?;
        log!("ComApartment: initialized ({:?})", hr);
        Ok(Self { owns_init: true })
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.owns_init {
            log!("ComApartment: uninitializing");
            unsafe { CoUninitialize() };
        }
    }
}
