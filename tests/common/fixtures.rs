/// Test data fixtures shared by the resolver tests
use azmon_select::datamodel::{AggregationInfo, MetricOption};

#[allow(dead_code)]
pub const VIRTUAL_MACHINES: &str = "Microsoft.Compute/virtualMachines";
#[allow(dead_code)]
pub const PUBLIC_IPS: &str = "Microsoft.Network/publicIPAddresses";

#[allow(dead_code)]
pub fn resource_groups() -> Vec<MetricOption> {
    vec![MetricOption::named("nodeapp"), MetricOption::named("otherapp")]
}

#[allow(dead_code)]
pub fn metric_definitions() -> Vec<MetricOption> {
    vec![
        MetricOption::named(VIRTUAL_MACHINES),
        MetricOption::named(PUBLIC_IPS),
    ]
}

#[allow(dead_code)]
pub fn resource_names() -> Vec<MetricOption> {
    vec![MetricOption::named("test1"), MetricOption::named("test2")]
}

#[allow(dead_code)]
pub fn metric_names() -> Vec<MetricOption> {
    vec![MetricOption::named("metric1"), MetricOption::named("metric2")]
}

#[allow(dead_code)]
pub fn cpu_aggregations() -> AggregationInfo {
    AggregationInfo::new("Average", ["Average", "Total"])
}

/// Catalog document with two resource groups
#[allow(dead_code)]
pub fn catalog_json() -> &'static str {
    r#"{
  "resourceGroups": [
    {
      "name": "nodeapp",
      "namespaces": [
        {
          "name": "Microsoft.Compute/virtualMachines",
          "resources": [
            {
              "name": "nodeapp-vm1",
              "metrics": [
                {
                  "name": "Percentage CPU",
                  "primaryAggType": "Average",
                  "supportAggOptions": ["Average", "Minimum", "Maximum"]
                },
                {
                  "name": "Network In",
                  "primaryAggType": "Total",
                  "supportAggOptions": ["Total"]
                }
              ]
            },
            {
              "name": "nodeapp-vm2",
              "metrics": [
                {
                  "name": "Percentage CPU",
                  "primaryAggType": "Average",
                  "supportAggOptions": ["Average"]
                }
              ]
            }
          ]
        },
        {
          "name": "Microsoft.Network/publicIPAddresses",
          "resources": [
            {
              "name": "nodeapp-ip",
              "metrics": [
                {
                  "name": "PacketCount",
                  "primaryAggType": "Total",
                  "supportAggOptions": ["Total", "Average"]
                }
              ]
            }
          ]
        }
      ]
    },
    {
      "name": "otherapp",
      "namespaces": [
        {
          "name": "Microsoft.Web/sites",
          "resources": [
            {
              "name": "otherapp-site",
              "metrics": [
                {
                  "name": "Requests",
                  "primaryAggType": "Total",
                  "supportAggOptions": ["Total", "Count"]
                }
              ]
            }
          ]
        }
      ]
    }
  ]
}"#
}
