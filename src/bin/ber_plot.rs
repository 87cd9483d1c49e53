use ber_plot::plot::parse_cli;
use ber_plot::{plot_overlay, BerSeries, ChartStyle};

fn main() {
    let job = parse_cli();
    let mut curves: Vec<(BerSeries, String)> = Vec::with_capacity(job.curves.len());
    for curve in &job.curves {
        match BerSeries::from_csv(&curve.path) {
            Ok(series) => curves.push((series, curve.label.clone())),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    }
    if let Err(e) = plot_overlay(&curves, &job.output, &ChartStyle::default()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    println!("Plot saved in {}", job.output.display());
}
