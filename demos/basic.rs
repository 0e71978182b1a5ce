use parcel_thermo::convective::{
    cape_cin, ccl, downdraft_cape, el_lfc, mixed_layer, DEFAULT_MIXED_LAYER_DEPTH,
};
use parcel_thermo::profile::{parcel_profile, parcel_profile_with_lcl};
use parcel_thermo::*;

fn main() {
    let (p, t, td) = (100000.0_f64, 293.15, 283.15);

    // -- Closed-form relations --
    println!("=== Surface parcel (f64) ===");
    println!("p = {p} Pa, T = {t} K, Td = {td} K");
    println!("es(Td)  = {:.3} Pa", saturation_vapor_pressure(td));
    println!("r       = {:.6} kg/kg", mixing_ratio_from_dewpoint(p, td));
    println!("theta   = {:.4} K", potential_temperature(p, t));
    println!("theta_e = {:.4} K", equivalent_potential_temperature(p, t, td));
    println!("theta_w = {:.4} K", wet_bulb_potential_temperature(p, t, td));

    // -- Iterative quantities, explicit solver parameters --
    println!("\n=== Iterative (eps = 1e-6, max_iters = 50, step = 1000 Pa) ===");
    let (lcl_p, lcl_t) = lcl(p, t, td, 1e-6, 50);
    println!("LCL     = {lcl_p:.3} Pa, {lcl_t:.4} K");
    let tw = wet_bulb_temperature(p, t, td, 1e-6, 1000.0, 50);
    println!("Tw      = {tw:.4} K");

    // -- Non-convergence is NaN in the core, an error in SolverConfig --
    println!("\n=== Non-convergence ===");
    let starved = lcl_pressure(p, t, td, 1e-12, 1);
    println!("lcl_pressure with max_iters = 1: {starved}");
    let config = SolverConfig::new(1e-12, 1, 1000.0).unwrap();
    println!("SolverConfig::lcl: {:?}", config.lcl(p, t, td));

    // -- Parcel profile --
    println!("\n=== Parcel profile ===");
    let levels = [100000.0, 92500.0, 85000.0, 70000.0, 50000.0, 30000.0];
    let mut parcel = [0.0; 6];
    let config = SolverConfig::<f64>::default();
    let lcl = parcel_profile(&levels, t, td, &config, &mut parcel).unwrap();
    for (level, temp) in levels.iter().zip(parcel) {
        let marker = if *level >= lcl.pressure { "dry" } else { "moist" };
        println!("  {level:>8.0} Pa  {temp:8.3} K  ({marker})");
    }

    // -- Sounding diagnostics --
    println!("\n=== Sounding diagnostics ===");
    let pressure = [
        100000.0, 95000.0, 90000.0, 85000.0, 80000.0, 70000.0, 60000.0, 50000.0, 40000.0,
        30000.0, 20000.0, 15000.0,
    ];
    let temperature = [
        303.15, 298.8, 295.3, 292.6, 289.9, 283.6, 276.1, 266.9, 255.0, 239.8, 220.0, 216.0,
    ];
    let dewpoint = [
        295.15, 293.0, 290.8, 285.5, 280.0, 270.0, 255.0, 240.0, 228.0, 210.0, 200.0, 190.0,
    ];
    let prof = parcel_profile_with_lcl(&pressure, &temperature, &dewpoint, &config).unwrap();
    let (el, lfc) = el_lfc(
        &prof.pressure,
        &prof.temperature,
        &prof.dewpoint,
        &prof.parcel,
        Pick::Top,
        Pick::Bottom,
        &config,
    )
    .unwrap();
    println!("LCL     = {:.0} Pa", prof.lcl.pressure);
    println!("LFC     = {:?}", lfc.map(|l| l.pressure));
    println!("EL      = {:?}", el.map(|l| l.pressure));
    let (cape, cin) = cape_cin(
        &prof.pressure,
        &prof.temperature,
        &prof.dewpoint,
        &prof.parcel,
        Pick::Top,
        Pick::Bottom,
        &config,
    )
    .unwrap();
    println!("CAPE    = {cape:.1} J/kg, CIN = {cin:.1} J/kg");
    let dcape = downdraft_cape(&pressure, &temperature, &dewpoint, &config).unwrap();
    println!("DCAPE   = {dcape:.1} J/kg");
    let (ml_t, ml_td) =
        mixed_layer(&pressure, &temperature, &dewpoint, DEFAULT_MIXED_LAYER_DEPTH).unwrap();
    println!("mixed layer: T = {ml_t:.2} K, Td = {ml_td:.2} K");
    if let Some((level, tc)) = ccl(&pressure, &temperature, &dewpoint, Pick::Bottom).unwrap() {
        println!("CCL     = {:.0} Pa, convective temperature {tc:.2} K", level.pressure);
    }

    // -- f32 support --
    println!("\n=== f32 support ===");
    let config = SolverConfig::<f32>::default();
    let lcl = config.lcl(100000.0, 293.15, 283.15).unwrap();
    let tw = config.wet_bulb_temperature(100000.0, 293.15, 283.15).unwrap();
    println!("LCL = {:.1} Pa, {:.3} K; Tw = {tw:.3} K (f32)", lcl.pressure, lcl.temperature);
}
