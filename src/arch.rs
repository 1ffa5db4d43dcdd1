//! `(cputype, cpusubtype)` to architecture name, mirroring the names the
//! platform's own architecture table reports.

const CPU_ARCH_ABI64: i32 = 0x01000000;
const CPU_ARCH_ABI64_32: i32 = 0x02000000;
const CPU_SUBTYPE_MASK: i32 = 0xff000000u32 as i32;

pub const CPU_TYPE_MC680X0: i32 = 6;
pub const CPU_TYPE_X86: i32 = 7;
pub const CPU_TYPE_X86_64: i32 = CPU_TYPE_X86 | CPU_ARCH_ABI64;
pub const CPU_TYPE_MC98000: i32 = 10;
pub const CPU_TYPE_HPPA: i32 = 11;
pub const CPU_TYPE_ARM: i32 = 12;
pub const CPU_TYPE_ARM64: i32 = CPU_TYPE_ARM | CPU_ARCH_ABI64;
pub const CPU_TYPE_ARM64_32: i32 = CPU_TYPE_ARM | CPU_ARCH_ABI64_32;
pub const CPU_TYPE_MC88000: i32 = 13;
pub const CPU_TYPE_SPARC: i32 = 14;
pub const CPU_TYPE_I860: i32 = 15;
pub const CPU_TYPE_POWERPC: i32 = 18;
pub const CPU_TYPE_POWERPC64: i32 = CPU_TYPE_POWERPC | CPU_ARCH_ABI64;

static ARCHITECTURES: &[(i32, i32, &str)] = &[
    (CPU_TYPE_HPPA, 0, "hppa"),
    (CPU_TYPE_HPPA, 1, "hppa7100LC"),
    (CPU_TYPE_X86, 3, "i386"),
    (CPU_TYPE_X86, 4, "i486"),
    (CPU_TYPE_X86, 0x84, "i486SX"),
    (CPU_TYPE_X86, 5, "pentium"),
    (CPU_TYPE_X86, 0x16, "pentpro"),
    (CPU_TYPE_X86, 0x36, "pentIIm3"),
    (CPU_TYPE_X86, 0x56, "pentIIm5"),
    (CPU_TYPE_X86, 0x0a, "pentium4"),
    (CPU_TYPE_X86_64, 3, "x86_64"),
    (CPU_TYPE_X86_64, 8, "x86_64h"),
    (CPU_TYPE_I860, 0, "i860"),
    (CPU_TYPE_MC680X0, 1, "m68k"),
    (CPU_TYPE_MC680X0, 2, "m68040"),
    (CPU_TYPE_MC680X0, 3, "m68030"),
    (CPU_TYPE_MC88000, 0, "m88k"),
    (CPU_TYPE_MC98000, 0, "m98k"),
    (CPU_TYPE_POWERPC, 0, "ppc"),
    (CPU_TYPE_POWERPC, 1, "ppc601"),
    (CPU_TYPE_POWERPC, 3, "ppc603"),
    (CPU_TYPE_POWERPC, 4, "ppc603e"),
    (CPU_TYPE_POWERPC, 5, "ppc603ev"),
    (CPU_TYPE_POWERPC, 6, "ppc604"),
    (CPU_TYPE_POWERPC, 7, "ppc604e"),
    (CPU_TYPE_POWERPC, 9, "ppc750"),
    (CPU_TYPE_POWERPC, 10, "ppc7400"),
    (CPU_TYPE_POWERPC, 11, "ppc7450"),
    (CPU_TYPE_POWERPC, 100, "ppc970"),
    (CPU_TYPE_POWERPC64, 0, "ppc64"),
    (CPU_TYPE_POWERPC64, 100, "ppc970-64"),
    (CPU_TYPE_SPARC, 0, "sparc"),
    (CPU_TYPE_ARM, 0, "arm"),
    (CPU_TYPE_ARM, 5, "armv4t"),
    (CPU_TYPE_ARM, 6, "armv6"),
    (CPU_TYPE_ARM, 7, "armv5"),
    (CPU_TYPE_ARM, 8, "xscale"),
    (CPU_TYPE_ARM, 9, "armv7"),
    (CPU_TYPE_ARM, 10, "armv7f"),
    (CPU_TYPE_ARM, 11, "armv7s"),
    (CPU_TYPE_ARM, 12, "armv7k"),
    (CPU_TYPE_ARM, 13, "armv8"),
    (CPU_TYPE_ARM, 14, "armv6m"),
    (CPU_TYPE_ARM, 15, "armv7m"),
    (CPU_TYPE_ARM, 16, "armv7em"),
    (CPU_TYPE_ARM64, 0, "arm64"),
    (CPU_TYPE_ARM64, 1, "arm64v8"),
    (CPU_TYPE_ARM64, 2, "arm64e"),
    (CPU_TYPE_ARM64_32, 1, "arm64_32"),
];

/// Looks up the architecture name; capability bits in the subtype's high
/// byte (e.g. `CPU_SUBTYPE_LIB64`, the arm64e ABI version) are ignored.
pub fn resolve(cputype: i32, cpusubtype: i32) -> Option<&'static str> {
    let subtype = cpusubtype & !CPU_SUBTYPE_MASK;
    ARCHITECTURES
        .iter()
        .find(|&&(ty, sub, _)| ty == cputype && sub == subtype)
        .map(|&(_, _, name)| name)
}
