use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Low event mask (`COR_PRF_MONITOR`) an agent subscribes to runtime callbacks with
    ///
    /// Each component of an agent unions the flags it needs into a shared mask during setup;
    /// the combined value is handed to the runtime once.
    pub struct ProfilerEventMask: u32 {
        /// Function unload callbacks
        const MONITOR_FUNCTION_UNLOADS = 0x0000_0001;
        /// Class load / unload callbacks
        const MONITOR_CLASS_LOADS = 0x0000_0002;
        /// Module load / unload / attach callbacks
        const MONITOR_MODULE_LOADS = 0x0000_0004;
        /// Assembly load / unload callbacks
        const MONITOR_ASSEMBLY_LOADS = 0x0000_0008;
        /// Application domain load / unload callbacks
        const MONITOR_APPDOMAIN_LOADS = 0x0000_0010;
        /// JIT compilation callbacks
        const MONITOR_JIT_COMPILATION = 0x0000_0020;
        /// Exception thrown, search, unwind and catcher callbacks
        const MONITOR_EXCEPTIONS = 0x0000_0040;
        /// Garbage collection callbacks
        const MONITOR_GC = 0x0000_0080;
        /// Object allocation callbacks
        const MONITOR_OBJECT_ALLOCATED = 0x0000_0100;
        /// Thread created / destroyed / assigned-to-OS-thread callbacks
        const MONITOR_THREADS = 0x0000_0200;
        /// Remoting callbacks
        const MONITOR_REMOTING = 0x0000_0400;
        /// Managed / unmanaged transition callbacks
        const MONITOR_CODE_TRANSITIONS = 0x0000_0800;
        /// Function enter / leave hooks
        const MONITOR_ENTERLEAVE = 0x0000_1000;
        /// COM callable wrapper callbacks
        const MONITOR_CCW = 0x0000_2000;
        /// Runtime suspend / resume callbacks
        const MONITOR_SUSPENDS = 0x0001_0000;
        /// Native image cache search callbacks
        const MONITOR_CACHE_SEARCHES = 0x0002_0000;
        /// CLR-internal exception callbacks
        const MONITOR_CLR_EXCEPTIONS = 0x0100_0000;
    }
}

impl ProfilerEventMask {
    /// Builds a mask from the raw `DWORD` value, ignoring bits this crate does not model
    #[must_use]
    pub fn from_raw(events_low: u32) -> Self {
        Self::from_bits_truncate(events_low)
    }
}

impl Default for ProfilerEventMask {
    fn default() -> Self {
        Self::empty()
    }
}
