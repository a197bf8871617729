//! Definitions of the runtime helpers.
//!
//! These never use the operators they replace, so they need no lowering themselves. They are
//! indented with tabs, which are swapped for the output's indentation unit.

use unsugar_ir::Helper;

const NOT: &str = "def _not(value):
\tif value:
\t\treturn False
\treturn True";

const IN: &str = "def _in(item, container):
\tcontains = getattr(type(container), \"__contains__\", None)
\tif contains is None:
\t\tit = iter(container)
\t\twhile True:
\t\t\ttry:
\t\t\t\telem = next(it)
\t\t\texcept StopIteration:
\t\t\t\treturn False
\t\t\tif elem is item:
\t\t\t\treturn True
\t\t\tif elem == item:
\t\t\t\treturn True
\tif contains(container, item):
\t\treturn True
\treturn False";

const NOT_IN: &str = "def _not_in(item, container):
\tcontains = getattr(type(container), \"__contains__\", None)
\tif contains is None:
\t\tit = iter(container)
\t\twhile True:
\t\t\ttry:
\t\t\t\telem = next(it)
\t\t\texcept StopIteration:
\t\t\t\treturn True
\t\t\tif elem is item:
\t\t\t\treturn False
\t\t\tif elem == item:
\t\t\t\treturn False
\tif contains(container, item):
\t\treturn False
\treturn True";

const AND: &str = "def _and(*operands):
\tvalue = True
\ti = 0
\twhile i < len(operands):
\t\tvalue = operands[i]()
\t\tif value:
\t\t\ti += 1
\t\t\tcontinue
\t\treturn value
\treturn value";

const OR: &str = "def _or(*operands):
\tvalue = False
\ti = 0
\twhile i < len(operands):
\t\tvalue = operands[i]()
\t\tif value:
\t\t\treturn value
\t\ti += 1
\treturn value";

pub(crate) fn get(h: Helper) -> &'static str {
  match h {
    Helper::Not => NOT,
    Helper::In => IN,
    Helper::NotIn => NOT_IN,
    Helper::And => AND,
    Helper::Or => OR,
  }
}
