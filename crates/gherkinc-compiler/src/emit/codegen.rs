//! The test-harness emitter.
//!
//! Walks features in source order and appends C++ text to one buffer.
//! Indentation is four spaces per level; the running line count is what
//! lets a FAIL line point back into the generated file.

use gherkinc_core::ast::{Expression, Feature, Scenario, ScenarioItem, Statement};

pub struct CodeGen<'a> {
    features: &'a [Feature],
    includes: &'a [String],
    code: String,
    line_count: u32,
    indentation: u32,
    total_scenarios: usize,
    error_scenarios: usize,
}

impl<'a> CodeGen<'a> {
    pub fn new(features: &'a [Feature], includes: &'a [String]) -> Self {
        Self {
            features,
            includes,
            code: String::new(),
            line_count: 0,
            indentation: 0,
            total_scenarios: 0,
            error_scenarios: 0,
        }
    }

    pub fn build(mut self) -> String {
        self.emit_prelude();
        let features = self.features;
        for feature in features {
            self.emit_feature(feature);
        }
        self.emit_epilogue();
        self.code
    }

    fn emit_feature(&mut self, feature: &Feature) {
        self.push_block();
        self.line("int _passedScenarioCount = 0;");
        self.line(&format!("cout << \"FEATURE: {}\" << endl;", feature.name));
        for scenario in &feature.scenarios {
            self.total_scenarios += 1;
            match scenario {
                ScenarioItem::ReportErr(err) => {
                    self.error_scenarios += 1;
                    self.line(&format!("cout << \" - ERROR: {}\" << endl;", err.msg));
                }
                ScenarioItem::Scenario(scenario) => self.emit_scenario(scenario),
            }
        }
        self.line("_totalPassedScenarioCount += _passedScenarioCount;");
        self.line(&format!(
            "cout << \"{} passed \" << _passedScenarioCount << \" of {} tests.\" << endl;",
            feature.name,
            feature.scenarios.len()
        ));
        self.pop_block();
    }

    /// Each scenario runs in its own block so background declarations are
    /// fresh per scenario and names never leak between them.
    fn emit_scenario(&mut self, scenario: &Scenario) {
        let starting_line = self.line_count;
        self.push_block();
        self.line("bool _scenarioPassed = true;");

        for stmt in &scenario.background {
            self.emit_statement(stmt);
        }
        for stmt in &scenario.statements {
            self.emit_statement(stmt);
        }

        self.line("if (_scenarioPassed){");
        self.line(&format!(
            "    cout << \" - PASS: {}\" << endl;",
            scenario.name
        ));
        self.line("    _passedScenarioCount++;");
        self.line("} else {");
        self.line(&format!(
            "    cout << \" - FAIL: {}\" << endl;",
            scenario.name
        ));
        self.line(&format!(
            "    cout << \"         at src/tests.cc:{starting_line}\" << endl;"
        ));
        self.line("}");
        self.pop_block();
    }

    fn emit_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Setter { target, value } => {
                self.line(&format!(
                    "{} = {};",
                    gen_expression(target),
                    gen_expression(value)
                ));
            }
            Statement::Assertion { value } => {
                self.line(&format!(
                    "_scenarioPassed = _scenarioPassed && {};",
                    gen_expression(value)
                ));
            }
            Statement::VarDeclare {
                name,
                value: None,
                ty,
            } => {
                self.line(&format!("{ty} {name};"));
            }
            Statement::VarDeclare {
                name,
                value: Some(value),
                ty,
            } => {
                self.line(&format!("{ty} {name} = {};", gen_expression(value)));
            }
            Statement::Expr { value } => {
                self.line(&format!("{};", gen_expression(value)));
            }
        }
    }

    fn emit_prelude(&mut self) {
        self.line("#include <chrono>");
        let includes = self.includes;
        for file in includes {
            self.line(&format!("#include \"{file}\""));
        }
        self.line("");
        self.line("// THIS FILE IS AUTOMATICALLY GENERATED. DO NOT EDIT MANUALLY.");
        self.line("int main()");
        self.push_block();
        self.line("int _totalPassedScenarioCount = 0;");
        self.line("long _start_time = chrono::duration_cast< chrono::milliseconds >( chrono::system_clock::now().time_since_epoch()).count();");
    }

    fn emit_epilogue(&mut self) {
        self.line("long _end_time = chrono::duration_cast< chrono::milliseconds >( chrono::system_clock::now().time_since_epoch()).count();");
        self.line(&format!(
            "cout << \"TOTAL: pass \" << _totalPassedScenarioCount << \", fail \" << ({0} - {1} - _totalPassedScenarioCount) << \", error {1}\" << endl;",
            self.total_scenarios, self.error_scenarios
        ));
        self.line(&format!("cout << \"{}\" << endl;", "=".repeat(30)));
        self.line("cout << \"- Execute: \" << (_end_time - _start_time) << \" ms.\" << endl;");
        self.line("return 0;");
        self.pop_block();
    }

    fn push_block(&mut self) {
        self.line("{");
        self.indentation += 1;
    }

    fn pop_block(&mut self) {
        self.indentation -= 1;
        self.line("}");
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indentation {
            self.code.push_str("    ");
        }
        self.code.push_str(text);
        self.code.push('\n');
        self.line_count += 1;
    }
}

/// Lower one expression tree to C++ source. Pure: the same AST always
/// produces the same text.
pub fn gen_expression(expr: &Expression) -> String {
    match expr {
        Expression::Var { name, .. } => name.clone(),
        Expression::Literal { symbol, .. } => symbol.clone(),
        Expression::FieldAccess { field, obj, .. } => {
            format!("{}.{}", gen_expression(obj), field.name)
        }
        Expression::Unary { op, value, .. } => format!("({op}{})", gen_expression(value)),
        Expression::Binary {
            op, left, right, ..
        } => format!("({} {op} {})", gen_expression(left), gen_expression(right)),
        Expression::Dereference { value, .. } => format!("(*{})", gen_expression(value)),
        Expression::AddressOf { value, .. } => format!("(&{})", gen_expression(value)),
        Expression::Call { func, args, .. } => {
            if func.is_static {
                let rendered: Vec<String> = args.iter().map(gen_expression).collect();
                match &func.namespace {
                    Some(ns) => format!("{ns}::{}({})", func.name, rendered.join(", ")),
                    None => format!("{}({})", func.name, rendered.join(", ")),
                }
            } else {
                let rendered: Vec<String> = args.iter().skip(1).map(gen_expression).collect();
                format!(
                    "{}.{}({})",
                    gen_expression(&args[0]),
                    func.name,
                    rendered.join(", ")
                )
            }
        }
    }
}
